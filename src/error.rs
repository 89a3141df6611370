use thiserror::Error;

/// Everything that can stop a CHIP-8 program. Address wraparound is not in
/// here: it is silent and always defined.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Chip8Error {
    #[error("undecodable instruction 0x{word:04X} at 0x{addr:03X}")]
    Decode { addr: u16, word: u16 },

    #[error("call stack overflow at 0x{addr:03X}")]
    StackOverflow { addr: u16 },

    #[error("return with empty call stack at 0x{addr:03X}")]
    StackUnderflow { addr: u16 },

    #[error("program is {size} bytes, only {max} bytes fit in memory")]
    ProgramTooLarge { size: usize, max: usize },
}
