//! # interpreter
//!
//! The machine itself: 4K of RAM, sixteen 8-bit registers V0-VF, the 12-bit
//! index register I, the program counter, a 16-deep call stack, the two
//! timers, the screen and the keypad.
//!
//! Each call to `cycle` fetches the word at PC, moves PC on by 2 and only
//! then executes, so jumps, calls and skips just overwrite or bump PC. VF is
//! the flag output for carry, borrow, shifted-out bits and sprite collision.
//!
//! Fx0A and the display-wait quirk are modelled as run states rather than
//! blocking: while waiting, `cycle` does nothing and returns
//! `CycleOutcome::Waiting`, while timers keep ticking. A fault halts the
//! machine with PC left on the faulting instruction.
use crate::{
    error::Chip8Error,
    framebuffer::FrameBuffer,
    instruction::Instruction,
    keypad::Keypad,
    memory::{Chip8MemoryMap, MemoryMap, CHIP8_ADDR_MASK, CHIP8_PROGRAM_ADDR},
    quirks::Quirks,
    timer::Timers,
};
use log::{debug, error, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const REGISTER_COUNT: usize = 16;
pub const STACK_SIZE: usize = 16;
const VF: usize = 0xf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Fx0A: parked until a key goes down, then the key lands in Vx
    AwaitingKey { x: u8 },
    /// display-wait quirk: parked until the next timer tick
    AwaitingVblank,
    Halted(Chip8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Executed(Instruction),
    /// nothing was fetched; the machine is parked in a wait state
    Waiting,
}

pub struct Chip8Interpreter {
    memory: Chip8MemoryMap,
    v: [u8; REGISTER_COUNT],
    i: u16,
    pc: u16,
    stack: Vec<u16>,
    timers: Timers,
    frame: FrameBuffer,
    keys: Keypad,
    // key state at the last look while parked on Fx0A, so only fresh presses count
    key_baseline: Keypad,
    quirks: Quirks,
    rng: StdRng,
    state: RunState,
    redraw: bool,
}

impl Default for Chip8Interpreter {
    fn default() -> Self {
        Self::new(Quirks::default())
    }
}

impl Chip8Interpreter {
    /// fresh machine with an entropy-seeded random source
    pub fn new(quirks: Quirks) -> Self {
        Self::with_rng(quirks, StdRng::from_entropy())
    }

    /// fresh machine whose Cxkk results are reproducible
    pub fn with_seed(quirks: Quirks, seed: u64) -> Self {
        Self::with_rng(quirks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(quirks: Quirks, rng: StdRng) -> Self {
        Chip8Interpreter {
            memory: Chip8MemoryMap::new(),
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: CHIP8_PROGRAM_ADDR,
            stack: Vec::with_capacity(STACK_SIZE),
            timers: Timers::new(),
            frame: FrameBuffer::new(),
            keys: Keypad::new(),
            key_baseline: Keypad::new(),
            quirks,
            rng,
            state: RunState::Running,
            redraw: false,
        }
    }

    /// back to power-on state; quirks and the random source are kept
    pub fn reset(&mut self) {
        self.memory = Chip8MemoryMap::new();
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.pc = CHIP8_PROGRAM_ADDR;
        self.stack.clear();
        self.timers = Timers::new();
        self.frame.clear();
        self.keys = Keypad::new();
        self.key_baseline = Keypad::new();
        self.state = RunState::Running;
        self.redraw = true;
    }

    /// load a chip8 program at 0x200
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        self.memory.load_program(program)?;
        info!(
            "loaded {} byte program at 0x{:03X}",
            program.len(),
            self.memory.program_addr
        );
        Ok(())
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn memory(&self) -> &Chip8MemoryMap {
        &self.memory
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn is_waiting_for_key(&self) -> bool {
        matches!(self.state, RunState::AwaitingKey { .. })
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state, RunState::Halted(_))
    }

    /// true while the sound timer runs
    pub fn tone_active(&self) -> bool {
        self.timers.tone_active()
    }

    /// Checks and clears the redraw flag
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Replace the keypad state. While parked on Fx0A, a key that is down
    /// now but was up at the previous look completes the instruction.
    pub fn set_keys(&mut self, keys: Keypad) {
        if let RunState::AwaitingKey { x } = self.state {
            if let Some(key) = keys.first_new_press(&self.key_baseline) {
                debug!("key 0x{:X} pressed, V{:X} <- 0x{:X}", key, x, key);
                self.v[x as usize] = key;
                self.pc = self.pc.wrapping_add(2) & CHIP8_ADDR_MASK;
                self.state = RunState::Running;
            }
            self.key_baseline = keys;
        }
        self.keys = keys;
    }

    pub fn keys(&self) -> &Keypad {
        &self.keys
    }

    /// One 60 Hz timer tick. Also releases a display-wait.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
        if self.state == RunState::AwaitingVblank {
            self.state = RunState::Running;
        }
    }

    /// fetch, decode and execute one instruction
    pub fn cycle(&mut self) -> Result<CycleOutcome, Chip8Error> {
        match &self.state {
            RunState::Halted(e) => return Err(e.clone()),
            RunState::AwaitingKey { .. } | RunState::AwaitingVblank => {
                return Ok(CycleOutcome::Waiting)
            }
            RunState::Running => {}
        }

        let addr = self.pc;
        let word = self.memory.get_word(addr);
        self.pc = addr.wrapping_add(2) & CHIP8_ADDR_MASK;

        let result = match Instruction::decode(word) {
            Some(inst) => {
                trace!("{:03X}: {:04X}  {}", addr, word, inst);
                self.execute(inst, addr).map(|_| CycleOutcome::Executed(inst))
            }
            None => Err(Chip8Error::Decode { addr, word }),
        };
        if let Err(e) = &result {
            error!("halting: {}", e);
            self.pc = addr;
            self.state = RunState::Halted(e.clone());
        }
        result
    }

    fn execute(&mut self, inst: Instruction, addr: u16) -> Result<(), Chip8Error> {
        use Instruction::*;
        match inst {
            Sys(target) => debug!("ignoring machine code call to 0x{:03X}", target),
            ClearScreen => {
                self.frame.clear();
                self.redraw = true;
            }
            Return => self.pc = self.stack.pop().ok_or(Chip8Error::StackUnderflow { addr })?,
            Jump(target) => self.pc = target,
            Call(target) => {
                if self.stack.len() >= STACK_SIZE {
                    return Err(Chip8Error::StackOverflow { addr });
                }
                self.stack.push(self.pc);
                self.pc = target;
            }
            SkipEqImm(x, kk) => self.skip_if(self.reg(x) == kk),
            SkipNeImm(x, kk) => self.skip_if(self.reg(x) != kk),
            SkipEqReg(x, y) => self.skip_if(self.reg(x) == self.reg(y)),
            SkipNeReg(x, y) => self.skip_if(self.reg(x) != self.reg(y)),
            LoadImm(x, kk) => self.set_reg(x, kk),
            AddImm(x, kk) => self.set_reg(x, self.reg(x).wrapping_add(kk)),
            Move(x, y) => self.set_reg(x, self.reg(y)),
            Or(x, y) => self.logic(x, self.reg(x) | self.reg(y)),
            And(x, y) => self.logic(x, self.reg(x) & self.reg(y)),
            Xor(x, y) => self.logic(x, self.reg(x) ^ self.reg(y)),
            Add(x, y) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_with_flag(x, sum, carry);
            }
            Sub(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_with_flag(x, vx.wrapping_sub(vy), vx >= vy);
            }
            SubReverse(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_with_flag(x, vy.wrapping_sub(vx), vy >= vx);
            }
            ShiftRight(x, y) => {
                let src = self.shift_source(x, y);
                self.set_with_flag(x, src >> 1, src & 0x01 != 0);
            }
            ShiftLeft(x, y) => {
                let src = self.shift_source(x, y);
                self.set_with_flag(x, src << 1, src & 0x80 != 0);
            }
            LoadIndex(nnn) => self.i = nnn & CHIP8_ADDR_MASK,
            JumpOffset(nnn) => {
                let offset = if self.quirks.jump_offset_variant {
                    self.reg((nnn >> 8) as u8)
                } else {
                    self.v[0]
                };
                self.pc = nnn.wrapping_add(offset as u16) & CHIP8_ADDR_MASK;
            }
            Random(x, kk) => {
                let r: u8 = self.rng.gen();
                self.set_reg(x, r & kk);
            }
            Draw(x, y, n) => self.draw(x, y, n),
            SkipKeyDown(x) => self.skip_if(self.keys.is_pressed(self.reg(x))),
            SkipKeyUp(x) => self.skip_if(!self.keys.is_pressed(self.reg(x))),
            ReadDelay(x) => self.set_reg(x, self.timers.delay),
            WaitKey(x) => {
                debug!("waiting for key into V{:X}", x);
                self.pc = addr;
                self.key_baseline = self.keys;
                self.state = RunState::AwaitingKey { x };
            }
            SetDelay(x) => self.timers.delay = self.reg(x),
            SetSound(x) => self.timers.sound = self.reg(x),
            AddIndex(x) => {
                let sum = self.i + self.reg(x) as u16;
                if self.quirks.index_overflow_sets_vf {
                    self.v[VF] = (sum > CHIP8_ADDR_MASK) as u8;
                }
                self.i = sum & CHIP8_ADDR_MASK;
            }
            LoadGlyph(x) => self.i = self.memory.glyph_addr(self.reg(x)),
            StoreBcd(x) => {
                let value = self.reg(x);
                self.memory.write(&[value / 100, (value / 10) % 10, value % 10], self.i);
            }
            StoreRegisters(x) => {
                for k in 0..=x {
                    self.memory
                        .write_byte(self.i.wrapping_add(k as u16), self.v[k as usize]);
                }
                self.advance_index_after_load_store(x);
            }
            LoadRegisters(x) => {
                for k in 0..=x {
                    self.v[k as usize] = self.memory.read_byte(self.i.wrapping_add(k as u16));
                }
                self.advance_index_after_load_store(x);
            }
        }
        Ok(())
    }

    fn reg(&self, x: u8) -> u8 {
        self.v[(x & 0x0f) as usize]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.v[(x & 0x0f) as usize] = value;
    }

    // VF is written last so the flag wins when x is F
    fn set_with_flag(&mut self, x: u8, value: u8, flag: bool) {
        self.set_reg(x, value);
        self.v[VF] = flag as u8;
    }

    fn logic(&mut self, x: u8, value: u8) {
        self.set_reg(x, value);
        if self.quirks.logic_resets_vf {
            self.v[VF] = 0;
        }
    }

    fn shift_source(&self, x: u8, y: u8) -> u8 {
        if self.quirks.shift_uses_vy {
            self.reg(y)
        } else {
            self.reg(x)
        }
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2) & CHIP8_ADDR_MASK;
        }
    }

    fn advance_index_after_load_store(&mut self, x: u8) {
        let step = self.quirks.load_store_index_step(x);
        self.i = self.i.wrapping_add(step) & CHIP8_ADDR_MASK;
    }

    fn draw(&mut self, x: u8, y: u8, n: u8) {
        let sprite: Vec<u8> = (0..n as u16)
            .map(|row| self.memory.read_byte(self.i.wrapping_add(row)))
            .collect();
        let collision = self.frame.draw_sprite(
            self.reg(x),
            self.reg(y),
            &sprite,
            self.quirks.clip_sprite_vertically,
        );
        self.v[VF] = collision as u8;
        self.redraw = true;
        if self.quirks.display_wait {
            self.state = RunState::AwaitingVblank;
        }
    }
}
