use crate::error::Chip8Error;

// NB. addresses are u16 as per the chip-8; every access is masked to 12 bits
//     so a program can never reach outside the 4K of RAM

/// Represents the addressable memory of the machine
pub trait MemoryMap {
    /// read one byte; the address wraps at the top of RAM
    fn read_byte(&self, addr: u16) -> u8;

    /// write one byte; the address wraps at the top of RAM
    fn write_byte(&mut self, addr: u16, value: u8);

    /// write a chunk of bytes, wrapping byte by byte
    fn write(&mut self, data: &[u8], addr: u16) {
        for (offset, byte) in data.iter().enumerate() {
            self.write_byte(addr.wrapping_add(offset as u16), *byte);
        }
    }

    /// get a big-endian two-byte word (instructions)
    fn get_word(&self, addr: u16) -> u16 {
        ((self.read_byte(addr) as u16) << 8) | (self.read_byte(addr.wrapping_add(1)) as u16)
    }
}

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: usize = 4096;

/// mask applied to every address and to the index register
pub const CHIP8_ADDR_MASK: u16 = 0x0fff;

/// where the program is loaded
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

/// where the hex digit glyphs live, and how tall each one is
pub const CHIP8_FONT_ADDR: u16 = 0x050;
pub const CHIP8_FONT_GLYPH_BYTES: u16 = 5;

/// Defines the CHIP-8 memory map:
///   0x0000-0x01ff  interpreter (font glyphs at 0x0050-0x009f)
///   0x0200-0x0fff  program and scratch
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
    pub program_addr: u16,
    pub font_addr: u16,
}

impl MemoryMap for Chip8MemoryMap {
    fn read_byte(&self, addr: u16) -> u8 {
        self.bytes[(addr & CHIP8_ADDR_MASK) as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & CHIP8_ADDR_MASK) as usize] = value;
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8MemoryMap {
    /// zeroed RAM with the font baked in
    pub fn new() -> Self {
        let mut mm = Chip8MemoryMap {
            bytes: vec![0u8; CHIP8_RAM_SIZE_BYTES].into_boxed_slice(),
            program_addr: CHIP8_PROGRAM_ADDR,
            font_addr: CHIP8_FONT_ADDR,
        };
        mm.write(&CHIP8_FONT, CHIP8_FONT_ADDR);
        mm
    }

    /// largest program image that fits above the interpreter area
    pub fn max_program_size(&self) -> usize {
        CHIP8_RAM_SIZE_BYTES - self.program_addr as usize
    }

    /// load a CHIP-8 program at 0x200; oversized images are refused without
    /// touching memory
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        let max = self.max_program_size();
        if program.len() > max {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max,
            });
        }
        let start = self.program_addr as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// address of the glyph for the low nibble of `digit`
    pub fn glyph_addr(&self, digit: u8) -> u16 {
        self.font_addr + (digit & 0x0f) as u16 * CHIP8_FONT_GLYPH_BYTES
    }

    /// r/o view of a run of memory, for debugging and tests
    pub fn get_ro_slice(&self, addr: u16, len: usize) -> &[u8] {
        let a = (addr & CHIP8_ADDR_MASK) as usize;
        &self.bytes[a..(a + len).min(CHIP8_RAM_SIZE_BYTES)]
    }
}

const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
