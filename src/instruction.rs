//! Decoding of 16-bit instruction words.
//!
//! Operand fields, by nibble:
//!
//! ```text
//!   F  x  y  n      x: bits 8-11, y: bits 4-7, n: bits 0-3
//!         k  k      kk: bits 0-7
//!      n  n  n      nnn: bits 0-11
//! ```
use std::fmt;

/// One decoded CHIP-8 instruction. Register operands are indices 0x0-0xF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn: call a machine-code routine (ignored)
    Sys(u16),
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipEqImm(u8, u8),
    /// 4xkk
    SkipNeImm(u8, u8),
    /// 5xy0
    SkipEqReg(u8, u8),
    /// 6xkk
    LoadImm(u8, u8),
    /// 7xkk
    AddImm(u8, u8),
    /// 8xy0
    Move(u8, u8),
    /// 8xy1
    Or(u8, u8),
    /// 8xy2
    And(u8, u8),
    /// 8xy3
    Xor(u8, u8),
    /// 8xy4
    Add(u8, u8),
    /// 8xy5: Vx = Vx - Vy
    Sub(u8, u8),
    /// 8xy6
    ShiftRight(u8, u8),
    /// 8xy7: Vx = Vy - Vx
    SubReverse(u8, u8),
    /// 8xyE
    ShiftLeft(u8, u8),
    /// 9xy0
    SkipNeReg(u8, u8),
    /// Annn
    LoadIndex(u16),
    /// Bnnn (or Bxnn, depending on quirks)
    JumpOffset(u16),
    /// Cxkk
    Random(u8, u8),
    /// Dxyn
    Draw(u8, u8, u8),
    /// Ex9E
    SkipKeyDown(u8),
    /// ExA1
    SkipKeyUp(u8),
    /// Fx07
    ReadDelay(u8),
    /// Fx0A
    WaitKey(u8),
    /// Fx15
    SetDelay(u8),
    /// Fx18
    SetSound(u8),
    /// Fx1E
    AddIndex(u8),
    /// Fx29
    LoadGlyph(u8),
    /// Fx33
    StoreBcd(u8),
    /// Fx55
    StoreRegisters(u8),
    /// Fx65
    LoadRegisters(u8),
}

impl Instruction {
    /// Decode an instruction word, or `None` when the word matches no
    /// documented instruction.
    pub fn decode(word: u16) -> Option<Instruction> {
        let x = ((word >> 8) & 0x0f) as u8;
        let y = ((word >> 4) & 0x0f) as u8;
        let n = (word & 0x0f) as u8;
        let kk = (word & 0xff) as u8;
        let nnn = word & 0x0fff;

        use Instruction::*;
        let inst = match word >> 12 {
            0x0 => match nnn {
                0x0e0 => ClearScreen,
                0x0ee => Return,
                _ => Sys(nnn),
            },
            0x1 => Jump(nnn),
            0x2 => Call(nnn),
            0x3 => SkipEqImm(x, kk),
            0x4 => SkipNeImm(x, kk),
            0x5 if n == 0 => SkipEqReg(x, y),
            0x6 => LoadImm(x, kk),
            0x7 => AddImm(x, kk),
            0x8 => match n {
                0x0 => Move(x, y),
                0x1 => Or(x, y),
                0x2 => And(x, y),
                0x3 => Xor(x, y),
                0x4 => Add(x, y),
                0x5 => Sub(x, y),
                0x6 => ShiftRight(x, y),
                0x7 => SubReverse(x, y),
                0xe => ShiftLeft(x, y),
                _ => return None,
            },
            0x9 if n == 0 => SkipNeReg(x, y),
            0xa => LoadIndex(nnn),
            0xb => JumpOffset(nnn),
            0xc => Random(x, kk),
            0xd => Draw(x, y, n),
            0xe => match kk {
                0x9e => SkipKeyDown(x),
                0xa1 => SkipKeyUp(x),
                _ => return None,
            },
            0xf => match kk {
                0x07 => ReadDelay(x),
                0x0a => WaitKey(x),
                0x15 => SetDelay(x),
                0x18 => SetSound(x),
                0x1e => AddIndex(x),
                0x29 => LoadGlyph(x),
                0x33 => StoreBcd(x),
                0x55 => StoreRegisters(x),
                0x65 => LoadRegisters(x),
                _ => return None,
            },
            _ => return None,
        };
        Some(inst)
    }
}

/// Cowgod-style mnemonics, used when tracing execution
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Sys(a) => write!(f, "SYS 0x{:03X}", a),
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(a) => write!(f, "JP 0x{:03X}", a),
            Call(a) => write!(f, "CALL 0x{:03X}", a),
            SkipEqImm(x, kk) => write!(f, "SE V{:X}, 0x{:02X}", x, kk),
            SkipNeImm(x, kk) => write!(f, "SNE V{:X}, 0x{:02X}", x, kk),
            SkipEqReg(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm(x, kk) => write!(f, "LD V{:X}, 0x{:02X}", x, kk),
            AddImm(x, kk) => write!(f, "ADD V{:X}, 0x{:02X}", x, kk),
            Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Add(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x, y) => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubReverse(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x, y) => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipNeReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(a) => write!(f, "LD I, 0x{:03X}", a),
            JumpOffset(a) => write!(f, "JP V0, 0x{:03X}", a),
            Random(x, kk) => write!(f, "RND V{:X}, 0x{:02X}", x, kk),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKeyDown(x) => write!(f, "SKP V{:X}", x),
            SkipKeyUp(x) => write!(f, "SKNP V{:X}", x),
            ReadDelay(x) => write!(f, "LD V{:X}, DT", x),
            WaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            LoadGlyph(x) => write!(f, "LD F, V{:X}", x),
            StoreBcd(x) => write!(f, "LD B, V{:X}", x),
            StoreRegisters(x) => write!(f, "LD [I], V{:X}", x),
            LoadRegisters(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
