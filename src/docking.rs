//! Docking-program memory: `mask = ...` and `mem[ADDRESS] = VALUE` lines, where a 36-bit mask
//! rewrites either the values written or the addresses they land on.

use std::str::FromStr;
use std::sync::LazyLock;

use arrayvec::ArrayVec;
use itertools::Itertools;
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{Error, Result};

pub const MASK_WIDTH: usize = 36;
const WIDTH_BITS: u64 = (1 << MASK_WIDTH) - 1;

static SET_MASK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^mask = (\S+)$").unwrap());
static WRITE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^mem\[(\d+)\] = (-?\d+)$").unwrap());

/// A parsed bitmask. The default is the all-`0` mask, in effect before a program sets one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Mask {
    /// 1 at every `1`.
    ones: u64,
    /// 0 at every `0` and above bit 35.
    keep: u64,
    /// Bit indices of every `X`, least significant first.
    floating: ArrayVec<u8, MASK_WIDTH>,
}

impl FromStr for Mask {
    type Err = Error;

    fn from_str(pattern: &str) -> Result<Self> {
        if pattern.len() != MASK_WIDTH {
            return Err(Error::InvalidToken(format!(
                "mask must be {MASK_WIDTH} symbols long, found {}", pattern.len()
            )));
        }
        if let Some(bad) = pattern.chars().find(|c| !matches!(c, '0' | '1' | 'X')) {
            return Err(Error::InvalidToken(format!("unexpected mask symbol {bad:?}")));
        }

        let bits = |symbol| pattern.bytes().rev().positions(move |b| b == symbol);
        Ok(Mask {
            ones: bits(b'1').fold(0, |acc, bit| acc | 1 << bit),
            keep: bits(b'0').fold(WIDTH_BITS, |acc, bit| acc & !(1 << bit)),
            floating: bits(b'X').map(|bit| bit as u8).collect(),
        })
    }
}

impl Mask {
    /// `1` forces a bit on, `0` forces it off, `X` passes it through.
    pub fn apply_to_value(&self, value: i64) -> i64 {
        (value | self.ones as i64) & self.keep as i64
    }

    pub fn floating_bits(&self) -> &[u8] {&self.floating}

    /// Every address `address` decodes to: `1` forces a bit on, `0` leaves it alone and each
    /// `X` takes both values. Yields `2^k` addresses for `k` floating bits, ordered by
    /// combination index with its lowest bit driving the lowest floating position.
    pub fn floating_addresses(&self, address: u64) -> impl Iterator<Item = u64> + '_ {
        let base = address | self.ones;
        (0 .. 1u64 << self.floating.len()).map(move |combination| base ^ self.spread(combination))
    }

    fn spread(&self, combination: u64) -> u64 {
        self.floating.iter().enumerate().fold(0, |pattern, (ix, &bit)|
            pattern | ((combination >> ix) & 1) << bit
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    SetMask(Mask),
    Write { address: u64, value: i64 },
}

/// Which side of a write the mask applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    /// Version 1: mask the value, store it at the literal address.
    Value,
    /// Version 2: store the literal value at every address the mask decodes to.
    Address,
}

/// Sparse memory; a later write to the same address replaces the earlier one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: FxHashMap<u64, i64>,
}

impl Memory {
    fn write(&mut self, address: u64, value: i64) {
        self.cells.insert(address, value);
    }

    pub fn get(&self, address: u64) -> Option<i64> {self.cells.get(&address).copied()}

    pub fn len(&self) -> usize {self.cells.len()}

    pub fn is_empty(&self) -> bool {self.cells.is_empty()}

    /// Fails with `SumOverflow` when the total leaves `i64`, whatever order the cells add up in.
    pub fn sum(&self) -> Result<i64> {
        let total = self.cells.values().map(|&value| i128::from(value)).sum::<i128>();
        i64::try_from(total).map_err(|_| Error::SumOverflow)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn parse(input: &str) -> Result<Self> {
        let mut instructions = vec![];
        for (ix, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {continue};
            let instruction = if let Some(caps) = SET_MASK.captures(line) {
                Instruction::SetMask(caps[1].parse().map_err(|err: Error| err.at_line(ix + 1))?)
            } else if let Some(caps) = WRITE.captures(line) {
                let address = caps[1].parse().map_err(|_|
                    Error::parse(ix + 1, format!("address {} out of range", &caps[1]))
                )?;
                let value = caps[2].parse().map_err(|_|
                    Error::parse(ix + 1, format!("value {} out of range", &caps[2]))
                )?;
                Instruction::Write { address, value }
            } else if line.starts_with("mask") {
                return Err(Error::parse(ix + 1, "expected `mask = PATTERN`"));
            } else if line.starts_with("mem") {
                return Err(Error::parse(ix + 1, "expected `mem[ADDRESS] = VALUE`"));
            } else {
                return Err(Error::parse(ix + 1, format!("unknown instruction {line:?}")));
            };
            instructions.push(instruction);
        }
        debug!(instructions = instructions.len(), "parsed docking program");
        Ok(Program { instructions })
    }

    pub fn instructions(&self) -> &[Instruction] {&self.instructions}

    pub fn run(&self, decoder: Decoder) -> Memory {
        let initial = Mask::default();
        let mut mask = &initial;
        let mut memory = Memory::default();
        for instruction in &self.instructions {
            match *instruction {
                Instruction::SetMask(ref next) => mask = next,
                Instruction::Write { address, value } => match decoder {
                    Decoder::Value => memory.write(address, mask.apply_to_value(value)),
                    Decoder::Address => for decoded in mask.floating_addresses(address) {
                        trace!(address = decoded, value, "write");
                        memory.write(decoded, value);
                    },
                },
            }
        }
        debug!(?decoder, cells = memory.len(), "ran docking program");
        memory
    }
}

pub fn day14(part: u8, input: &str) -> Result<String> {
    let program = Program::parse(input)?;
    let decoder = if part == 1 {Decoder::Value} else {Decoder::Address};
    Ok(program.run(decoder).sum()?.to_string())
}
