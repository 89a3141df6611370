pub const KEY_COUNT: usize = 16;

/// Level state of the 16-key hex pad. Written by whatever reads the real
/// keyboard; the interpreter only reads it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// build from a list of held key indices; anything above 0xF is ignored
    pub fn from_pressed(pressed: &[u8]) -> Self {
        let mut pad = Keypad::new();
        for &key in pressed {
            pad.set(key, true);
        }
        pad
    }

    pub fn set(&mut self, key: u8, down: bool) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = down;
        }
    }

    /// only the low nibble selects a key
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0x0f) as usize]
    }

    pub fn any_pressed(&self) -> bool {
        self.keys.iter().any(|&k| k)
    }

    /// lowest-numbered key that is down now but was up in `previous`
    pub fn first_new_press(&self, previous: &Keypad) -> Option<u8> {
        (0..KEY_COUNT)
            .find(|&k| self.keys[k] && !previous.keys[k])
            .map(|k| k as u8)
    }
}
