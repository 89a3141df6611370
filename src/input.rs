use crate::keypad::{Keypad, KEY_COUNT};
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use log::{debug, warn};
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

/// map of characters read from the keyboard to what the chip8 might expect
/// where '1' => 0x01 and 'a' => 0x0a
const CHIP8_LITERAL_KEYMAP: [(char, u8); 16] = [
    ('0', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('4', 0x04),
    ('5', 0x05),
    ('6', 0x06),
    ('7', 0x07),
    ('8', 0x08),
    ('9', 0x09),
    ('a', 0x0a),
    ('b', 0x0b),
    ('c', 0x0c),
    ('d', 0x0d),
    ('e', 0x0e),
    ('f', 0x0f),
];

/// ditto using left-hand side of qwerty keyboard
///   1 2 3 4      1 2 3 C
///   q w e r  =>  4 5 6 D
///   a s d f      7 8 9 E
///   z x c v      A 0 B F
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// terminals only report presses, so a key counts as held this long after
/// its most recent press (auto-repeat keeps it topped up)
const KEY_HOLD: Duration = Duration::from_millis(150);

/// reads the hex keypad
pub trait Input {
    /// current up/down state of all 16 keys
    fn poll_keys(&mut self) -> Result<Keypad, io::Error>;

    /// true once the user has asked to stop
    fn quit_requested(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keymap {
    /// 1234/qwer/asdf/zxcv laid out like the COSMAC VIP pad
    Conventional,
    /// 0-9 and a-f type their own value
    Literal,
}

impl Keymap {
    fn table(&self) -> HashMap<char, u8> {
        match self {
            Keymap::Conventional => HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            Keymap::Literal => HashMap::from(CHIP8_LITERAL_KEYMAP),
        }
    }
}

/// Tracks when each key was last pressed and turns that into level state.
struct KeyLatch {
    pressed_at: [Option<Instant>; KEY_COUNT],
    hold: Duration,
}

impl KeyLatch {
    fn new(hold: Duration) -> Self {
        KeyLatch {
            pressed_at: [None; KEY_COUNT],
            hold,
        }
    }

    fn press(&mut self, key: u8, at: Instant) {
        if let Some(slot) = self.pressed_at.get_mut(key as usize) {
            *slot = Some(at);
        }
    }

    fn keypad(&self, now: Instant) -> Keypad {
        let mut pad = Keypad::new();
        for (key, pressed_at) in self.pressed_at.iter().enumerate() {
            if let Some(at) = pressed_at {
                pad.set(key as u8, now.saturating_duration_since(*at) < self.hold);
            }
        }
        pad
    }
}

/// simple implementation of Input, using the terminal in raw mode
pub struct StdinInput {
    keymap: HashMap<char, u8>,
    latch: KeyLatch,
    quit: bool,
}

impl StdinInput {
    pub fn new(keymap: Keymap) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput {
            keymap: keymap.table(),
            latch: KeyLatch::new(KEY_HOLD),
            quit: false,
        })
    }

    fn read_stdin(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    KeyCode::Char(key) => match self.keymap.get(&key.to_ascii_lowercase()) {
                        Some(mapped_key) => self.latch.press(*mapped_key, Instant::now()),
                        None => {
                            warn!("can't map {:?} to a CHIP-8 key", key);
                        }
                    },
                    KeyCode::Esc => self.quit = true,
                    other => {
                        debug!("ignoring key event {:?}", other);
                    }
                },
                other => {
                    debug!("ignoring terminal event {:?}", other);
                }
            }
        }
        Ok(())
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for StdinInput {
    fn poll_keys(&mut self) -> Result<Keypad, io::Error> {
        self.read_stdin()?;
        Ok(self.latch.keypad(Instant::now()))
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// dummy Input implementation for testing: holds a fixed set of keys and
/// can ask to quit after a number of polls
pub struct DummyInput {
    keys: Keypad,
    polls: usize,
    quit_after: Option<usize>,
}

impl DummyInput {
    pub fn new(keys: &[u8]) -> Self {
        DummyInput {
            keys: Keypad::from_pressed(keys),
            polls: 0,
            quit_after: None,
        }
    }

    pub fn quit_after(mut self, polls: usize) -> Self {
        self.quit_after = Some(polls);
        self
    }

    pub fn set_keys(&mut self, keys: &[u8]) {
        self.keys = Keypad::from_pressed(keys);
    }
}

impl Input for DummyInput {
    fn poll_keys(&mut self) -> Result<Keypad, io::Error> {
        self.polls += 1;
        Ok(self.keys)
    }

    fn quit_requested(&self) -> bool {
        matches!(self.quit_after, Some(n) if self.polls >= n)
    }
}
