use beep::beep;
use std::error::Error;

/// makes the single CHIP-8 tone
pub trait Sound {
    fn beep(&mut self) -> Result<(), Box<dyn Error>>;
    fn stop(&mut self) -> Result<(), Box<dyn Error>>;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// PC speaker tone via the `beep` crate
pub struct SimpleBeep {
    is_beeping: bool,
}

impl Default for SimpleBeep {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Sound for SimpleBeep {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        beep(SIMPLEBEEP_PITCH)?;
        self.is_beeping = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_beeping {
            beep(0)?;
            self.is_beeping = false;
        }
        Ok(())
    }
}

/// silence; counts the tones it was asked for
#[derive(Default)]
pub struct Mute {
    pub is_beeping: bool,
    pub beeps: usize,
}

impl Mute {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sound for Mute {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        self.is_beeping = true;
        self.beeps += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        self.is_beeping = false;
        Ok(())
    }
}
