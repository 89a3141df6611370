use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use chip8_vm::display::MonoTermDisplay;
use chip8_vm::environment::Environment;
use chip8_vm::input::{Keymap, StdinInput};
use chip8_vm::sound::{Mute, SimpleBeep, Sound};
use chip8_vm::{Chip8Interpreter, IndexIncrement, Quirks};

/// Run a CHIP-8 program in the terminal
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// program image, loaded at 0x200
    rom: PathBuf,

    /// instructions per second
    #[arg(short, long, default_value_t = 700)]
    rate: u32,

    /// start from the COSMAC VIP quirks instead of the modern ones
    #[arg(long)]
    legacy: bool,

    /// 8xy6/8xyE shift Vy into Vx
    #[arg(long)]
    shift_uses_vy: bool,

    /// Fx55/Fx65 advance I
    #[arg(long)]
    load_store_increments_i: bool,

    /// with I advancing, stop on the last register (x) rather than past it (x+1)
    #[arg(long)]
    increment_by_x: bool,

    /// Bxnn jumps to xnn + Vx
    #[arg(long)]
    jump_offset_variant: bool,

    /// sprites wrap off the bottom of the screen instead of being clipped
    #[arg(long)]
    wrap_sprites: bool,

    /// Dxyn waits for the next 60 Hz tick
    #[arg(long)]
    display_wait: bool,

    /// seed for Cxkk, for repeatable runs
    #[arg(long)]
    seed: Option<u64>,

    /// no tone
    #[arg(short, long)]
    mute: bool,

    /// type hex digits 0-9/a-f instead of the 1234/qwer/asdf/zxcv pad
    #[arg(long)]
    hex_keys: bool,

    /// stop after this many instructions
    #[arg(long)]
    max_cycles: Option<u64>,
}

impl Args {
    fn quirks(&self) -> Quirks {
        let mut q = if self.legacy {
            Quirks::cosmac_vip()
        } else {
            Quirks::modern()
        };
        q.shift_uses_vy |= self.shift_uses_vy;
        q.load_store_increments_i |= self.load_store_increments_i;
        if self.increment_by_x {
            q.index_increment = IndexIncrement::X;
        }
        q.jump_offset_variant |= self.jump_offset_variant;
        if self.wrap_sprites {
            q.clip_sprite_vertically = false;
        }
        q.display_wait |= self.display_wait;
        q
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();

    // load first so a bad image never touches the terminal
    let program = fs::read(&args.rom)?;
    let quirks = args.quirks();
    let mut interpreter = match args.seed {
        Some(seed) => Chip8Interpreter::with_seed(quirks, seed),
        None => Chip8Interpreter::new(quirks),
    };
    interpreter.load_program(&program)?;

    let keymap = if args.hex_keys {
        Keymap::Literal
    } else {
        Keymap::Conventional
    };
    let mut display = MonoTermDisplay::new()?;
    let mut input = StdinInput::new(keymap)?;
    let mut sound: Box<dyn Sound> = if args.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };

    let result = Environment::new(&mut display, &mut input, sound.as_mut(), args.rate)
        .main_loop(&mut interpreter, args.max_cycles);

    // restore the terminal before anything gets printed
    drop(input);
    drop(display);
    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    let executed = result?;
    log::info!("{} instructions executed", executed);
    Ok(())
}
