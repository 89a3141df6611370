/// rate at which both timers count down, whatever the instruction rate
pub const TIMER_HZ: u32 = 60;

/// The delay and sound timers. Each one counts down by one per tick while
/// above zero and then sits at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// the only thing the audio side gets to see
    pub fn tone_active(&self) -> bool {
        self.sound > 0
    }
}
