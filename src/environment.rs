use crate::{
    clock::{Clock, Due},
    display::Display,
    input::Input,
    interpreter::{Chip8Interpreter, CycleOutcome},
    sound::Sound,
};
use log::info;
use std::error::Error;
use std::time::Instant;

/// What one pass round the main loop did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub executed: u32,
    pub quit: bool,
}

/// Binds an interpreter to its peripherals and keeps the two clocks: the
/// instruction rate, and the 60 Hz timer/vblank rate.
pub struct Environment<'a> {
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    cycles_per_second: u32,
    tone_on: bool,
}

impl<'a> Environment<'a> {
    pub fn new(
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
        cycles_per_second: u32,
    ) -> Self {
        Environment {
            display,
            input,
            sound,
            cycles_per_second,
            tone_on: false,
        }
    }

    /// Run in real time until the user quits, `max_cycles` instructions
    /// have run, or the program faults. Returns the instruction count.
    pub fn main_loop(
        &mut self,
        interpreter: &mut Chip8Interpreter,
        max_cycles: Option<u64>,
    ) -> Result<u64, Box<dyn Error>> {
        info!(
            "running at {} instructions per second",
            self.cycles_per_second
        );
        let mut clock = Clock::new(self.cycles_per_second);
        let start = Instant::now();
        let mut executed = 0u64;
        self.display.draw(interpreter.frame())?;

        let result = loop {
            let mut due = clock.advance(start.elapsed());
            if let Some(max) = max_cycles {
                let left = max.saturating_sub(executed);
                due.cycles = due.cycles.min(left.min(u32::MAX as u64) as u32);
            }
            let step = match self.step(interpreter, due) {
                Ok(step) => step,
                Err(e) => break Err(e),
            };
            executed += step.executed as u64;
            if step.quit || max_cycles.map_or(false, |max| executed >= max) {
                break Ok(executed);
            }
            spin_sleep::sleep(clock.until_next(start.elapsed()));
        };

        self.tone_on = false;
        self.sound.stop()?;
        info!("stopped after {} instructions", executed);
        result
    }

    /// One pass: read the keys, apply due timer ticks, run due cycles,
    /// then bring the screen and speaker up to date. Cycles stop early for
    /// the rest of the pass once the machine parks in a wait state.
    pub fn step(
        &mut self,
        interpreter: &mut Chip8Interpreter,
        due: Due,
    ) -> Result<Step, Box<dyn Error>> {
        let keys = self.input.poll_keys()?;
        if self.input.quit_requested() {
            return Ok(Step {
                executed: 0,
                quit: true,
            });
        }
        interpreter.set_keys(keys);

        for _ in 0..due.ticks {
            interpreter.tick_timers();
        }

        let mut executed = 0;
        for _ in 0..due.cycles {
            match interpreter.cycle()? {
                CycleOutcome::Executed(_) => executed += 1,
                CycleOutcome::Waiting => break,
            }
        }

        if interpreter.take_redraw() {
            self.display.draw(interpreter.frame())?;
        }

        let tone = interpreter.tone_active();
        if tone != self.tone_on {
            if tone {
                self.sound.beep()?;
            } else {
                self.sound.stop()?;
            }
            self.tone_on = tone;
        }

        Ok(Step {
            executed,
            quit: false,
        })
    }
}
