// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Number text decoding.
//!
//! Signed integers go through a table-driven micro-parser: a 256-entry
//! table of step functions indexed by the next input byte. Digits
//! accumulate, a leading sign records the sign, and any other byte stops
//! the parse without being consumed. The sign is applied only once the
//! parse stops. Accumulation wraps on overflow, so magnitudes beyond the
//! `i64` range produce wrapped values; narrowing to the declared width is
//! range checked.
//!
//! Unsigned integers and floats are parsed with the `lexical` parsers.

use lexical_parse_float::FromLexical as _;
use lexical_parse_integer::FromLexical as _;

use crate::core::value::{FieldValue, NumberKind};

/// Accumulator threaded through the step functions.
#[derive(Debug, Clone, Copy, Default)]
struct State {
    acc: i64,
    pos: usize,
    negative: bool,
    digits: usize,
}

enum Flow {
    Continue(State),
    Done(State),
}

type StepFn = fn(State, u8) -> Flow;

fn digit(state: State, byte: u8) -> Flow {
    Flow::Continue(State {
        acc: state
            .acc
            .wrapping_mul(10)
            .wrapping_add(i64::from(byte - b'0')),
        pos: state.pos + 1,
        digits: state.digits + 1,
        ..state
    })
}

fn minus(state: State, _byte: u8) -> Flow {
    if state.pos != 0 {
        return Flow::Done(state);
    }
    Flow::Continue(State {
        negative: true,
        pos: 1,
        ..state
    })
}

fn plus(state: State, _byte: u8) -> Flow {
    if state.pos != 0 {
        return Flow::Done(state);
    }
    Flow::Continue(State { pos: 1, ..state })
}

fn stop(state: State, _byte: u8) -> Flow {
    Flow::Done(state)
}

const fn build_steps() -> [StepFn; 256] {
    let mut table = [stop as StepFn; 256];
    let mut byte = b'0';
    while byte <= b'9' {
        table[byte as usize] = digit as StepFn;
        byte += 1;
    }
    table[b'-' as usize] = minus as StepFn;
    table[b'+' as usize] = plus as StepFn;
    table
}

static STEPS: [StepFn; 256] = build_steps();

/// Result of the signed micro-parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInt {
    /// Accumulated value with the sign applied
    pub value: i64,
    /// Index of the first unconsumed byte
    pub end: usize,
    /// Number of digits consumed
    pub digits: usize,
}

/// Run the signed micro-parser over `bytes`.
///
/// Parsing stops at the first byte that is neither a digit nor a leading
/// sign; that byte is not consumed. The end of the slice stops it as well.
pub fn parse_signed(bytes: &[u8]) -> ParsedInt {
    let mut state = State::default();
    while let Some(&byte) = bytes.get(state.pos) {
        match STEPS[byte as usize](state, byte) {
            Flow::Continue(next) => state = next,
            Flow::Done(last) => {
                state = last;
                break;
            }
        }
    }
    let value = if state.negative {
        state.acc.wrapping_neg()
    } else {
        state.acc
    };
    ParsedInt {
        value,
        end: state.pos,
        digits: state.digits,
    }
}

/// Parse a complete signed integer. Returns `None` unless the whole text
/// is an optional sign followed by at least one digit.
pub fn parse_i64(text: &str) -> Option<i64> {
    let parsed = parse_signed(text.as_bytes());
    (parsed.digits > 0 && parsed.end == text.len()).then_some(parsed.value)
}

/// Parse a complete unsigned integer, accepting a leading `+`.
pub fn parse_u64(text: &str) -> Option<u64> {
    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    u64::from_lexical(digits.as_bytes()).ok()
}

/// Parse a finite `f64`.
pub fn parse_f64(text: &str) -> Option<f64> {
    if !looks_numeric(text) {
        return None;
    }
    f64::from_lexical(text.as_bytes())
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse a finite `f32`.
pub fn parse_f32(text: &str) -> Option<f32> {
    if !looks_numeric(text) {
        return None;
    }
    f32::from_lexical(text.as_bytes())
        .ok()
        .filter(|v| v.is_finite())
}

/// Rejects the special names (`NaN`, `inf`) the float parser would accept.
fn looks_numeric(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

/// Decode number text into a value of exactly `kind`.
///
/// Returns `None` when the text is not a number or does not fit.
pub fn decode_number(text: &str, kind: NumberKind) -> Option<FieldValue<'static>> {
    let value = match kind {
        NumberKind::Int8 => FieldValue::Int8(i8::try_from(parse_i64(text)?).ok()?),
        NumberKind::Int16 => FieldValue::Int16(i16::try_from(parse_i64(text)?).ok()?),
        NumberKind::Int32 => FieldValue::Int32(i32::try_from(parse_i64(text)?).ok()?),
        NumberKind::Int64 => FieldValue::Int64(parse_i64(text)?),
        NumberKind::UInt8 => FieldValue::UInt8(u8::try_from(parse_u64(text)?).ok()?),
        NumberKind::UInt16 => FieldValue::UInt16(u16::try_from(parse_u64(text)?).ok()?),
        NumberKind::UInt32 => FieldValue::UInt32(u32::try_from(parse_u64(text)?).ok()?),
        NumberKind::UInt64 => FieldValue::UInt64(parse_u64(text)?),
        NumberKind::Float32 => FieldValue::Float32(parse_f32(text)?),
        NumberKind::Float64 => FieldValue::Float64(parse_f64(text)?),
    };
    Some(value)
}
