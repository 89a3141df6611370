//! A CHIP-8 virtual machine.
//!
//! ## Design
//!
//! * the interpreter owns all machine state; nothing is global
//! * one call to `Chip8Interpreter::cycle` is one fetch/decode/execute
//! * timers tick at 60 Hz on their own schedule, however fast instructions
//!   run; the environment keeps the two clocks apart
//! * waiting for a key (and, with the quirk on, for vblank) is a run state
//!   the caller can see, not a blocking call
//! * behaviours that historical interpreters disagree on are `Quirks`,
//!   fixed when the machine is built; the defaults are the modern ones
//! * display, input and sound are traits so a variety of front ends would
//!   work; the terminal versions use TUI, crossterm and the PC speaker
//!
//! Model
//!
//! Environment
//!  |-- display, input, sound, clock
//!  |-- interpreter(quirks, rng)
//!  |    |-- memory, registers, stack, timers, framebuffer, keypad
//!  |    `-- instruction decoder
//!  `-- main loop
//!       |-- keys = input.poll_keys(); interpreter.set_keys(keys)
//!       |-- due = clock.advance(elapsed)
//!       |-- due.ticks  x interpreter.tick_timers()
//!       |-- due.cycles x interpreter.cycle()   (stops early while waiting)
//!       |-- redraw / tone edges -> display, sound
//!       `-- sleep until the next cycle or tick is due
pub mod clock;
pub mod display;
pub mod environment;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod keypad;
pub mod memory;
pub mod quirks;
pub mod sound;
pub mod timer;

pub use error::Chip8Error;
pub use interpreter::{Chip8Interpreter, CycleOutcome, RunState};
pub use quirks::{IndexIncrement, Quirks};
