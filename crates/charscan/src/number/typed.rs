//! The typed number parser: accumulates a mantissa and position
//! bookkeeping during the scan, then composes the target value on
//! finalization.
//!
//! The mantissa is accumulated as a **negative** `i64` so that the most
//! negative value of the target type is representable without overflow.
//! When a digit no longer fits (float targets), the parser records the
//! overflow, rounds the mantissa once at the boundary, and keeps counting
//! dropped digits: pre-dot drops shift the value's scale up, post-dot
//! drops are pure precision loss. Trailing zeros after the dot are
//! deferred and only multiplied in when a later non-zero digit arrives,
//! which keeps the mantissa short and makes the overflow bookkeeping
//! observable-equivalent to parsing the full digit string.
//!
//! A builder preserving the exact original text is allocated lazily: on
//! the first error, on mixed-case hex digits, or on a `_` separator
//! (cases where the text can no longer be reconstructed from the numeric
//! state alone). Error messages always show the full token.

use crate::{
    error::{ScanError, ScanResult},
    number::{NumberParser, RadixMode},
};

/// A Java number literal with its inferred type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JavaNumber {
    /// No suffix, no dot, no exponent.
    Int(i32),
    /// `l`/`L` suffix.
    Long(i64),
    /// `f`/`F` suffix.
    Float(f32),
    /// `d`/`D` suffix, or a dot/exponent without suffix.
    Double(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    I32,
    I64,
    Float,
}

/// Number parser delivering `i32`/`i64`/`f32`/`f64` values.
#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct TypedNumberParser {
    target: Target,
    mode: RadixMode,
    allow_specials: bool,
    allow_underscore: bool,

    sign: Option<char>,
    radix: u32,
    radix_symbol: Option<char>,

    mantissa: i64,
    min: i64,
    min_negative: i64,

    digits_total: u32,
    leading_zeros: u32,
    pending_zeros: u32,
    dot_position: i32,
    /// Decimal scale of the value relative to the mantissa: fractional
    /// digits subtract one each, overflow-dropped integer digits add one.
    scale: i32,
    overflow: bool,

    in_exponent: bool,
    exp_symbol: Option<char>,
    exp_sign: Option<char>,
    exp_value: u32,
    exp_digits: u32,
    exp_leading_zeros: u32,

    special: Option<f64>,
    prev_digit: bool,
    pending_underscore: bool,
    error: bool,
    builder: Option<String>,
    hex_upper: Option<bool>,
}

impl TypedNumberParser {
    fn new(target: Target, mode: RadixMode, min: i64, min_negative: i64) -> Self {
        Self {
            target,
            mode,
            allow_specials: target == Target::Float,
            allow_underscore: false,
            sign: None,
            radix: 10,
            radix_symbol: None,
            mantissa: 0,
            min,
            min_negative,
            digits_total: 0,
            leading_zeros: 0,
            pending_zeros: 0,
            dot_position: -1,
            scale: 0,
            overflow: false,
            in_exponent: false,
            exp_symbol: None,
            exp_sign: None,
            exp_value: 0,
            exp_digits: 0,
            exp_leading_zeros: 0,
            special: None,
            prev_digit: false,
            pending_underscore: false,
            error: false,
            builder: None,
            hex_upper: None,
        }
    }

    /// Parser for an `i32` target.
    #[must_use]
    pub fn new_i32(mode: RadixMode) -> Self {
        Self::new(
            Target::I32,
            mode,
            -i64::from(i32::MAX),
            i64::from(i32::MIN),
        )
    }

    /// Parser for an `i64` target.
    #[must_use]
    pub fn new_i64(mode: RadixMode) -> Self {
        Self::new(Target::I64, mode, -i64::MAX, i64::MIN)
    }

    /// Parser for an `f32` target.
    #[must_use]
    pub fn new_f32(mode: RadixMode) -> Self {
        Self::new(Target::Float, mode, i64::MIN, i64::MIN)
    }

    /// Parser for an `f64` target.
    #[must_use]
    pub fn new_f64(mode: RadixMode) -> Self {
        Self::new(Target::Float, mode, i64::MIN, i64::MIN)
    }

    /// Parser for a Java number literal: `_` separators are allowed,
    /// `NaN`/`Infinity` are not, the value type is decided by the caller
    /// from the suffix.
    #[must_use]
    pub fn java_literal() -> Self {
        let mut parser = Self::new(Target::Float, RadixMode::All, i64::MIN, i64::MIN);
        parser.allow_specials = false;
        parser.allow_underscore = true;
        parser
    }

    /// Whether a dot or exponent was consumed.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        self.dot_position >= 0 || self.exp_symbol.is_some()
    }

    fn integer_target(&self) -> bool {
        matches!(self.target, Target::I32 | Target::I64)
    }

    // ------------------------------------------------------------------
    // Accumulation

    fn accumulate(&mut self, value: u32) {
        if value == 0 && self.mantissa == 0 {
            self.leading_zeros += 1;
            if self.dot_position >= 0 {
                self.scale -= 1;
            }
            return;
        }
        if value == 0 && self.dot_position >= 0 && !self.overflow {
            self.pending_zeros += 1;
            return;
        }
        if !self.overflow {
            self.apply_pending_zeros();
        }
        if self.overflow {
            self.dropped_digit();
            return;
        }
        let radix = i64::from(self.radix);
        let next = self
            .mantissa
            .checked_mul(radix)
            .and_then(|m| m.checked_sub(i64::from(value)));
        match next {
            Some(m) if m >= self.min => {
                self.mantissa = m;
                if self.dot_position >= 0 {
                    self.scale -= 1;
                }
            }
            _ => {
                if self.integer_target() {
                    self.fail();
                } else {
                    self.begin_overflow(value);
                    self.dropped_digit();
                }
            }
        }
    }

    fn apply_pending_zeros(&mut self) {
        let radix = i64::from(self.radix);
        while self.pending_zeros > 0 {
            match self.mantissa.checked_mul(radix) {
                Some(m) if m >= self.min => {
                    self.mantissa = m;
                    self.pending_zeros -= 1;
                    self.scale -= 1;
                }
                _ => {
                    // The first dropped digit is one of the zeros, so no
                    // rounding happens; they are post-dot and leave the
                    // scale untouched.
                    self.begin_overflow(0);
                    self.pending_zeros = 0;
                    break;
                }
            }
        }
    }

    fn begin_overflow(&mut self, first_dropped: u32) {
        self.ensure_builder();
        self.overflow = true;
        if u64::from(first_dropped) * 2 >= u64::from(self.radix) && self.mantissa > i64::MIN {
            // Round the mantissa magnitude up once at the overflow boundary.
            self.mantissa -= 1;
        }
    }

    fn dropped_digit(&mut self) {
        if self.dot_position < 0 {
            self.scale += 1;
        }
    }

    fn exponent_digit(&mut self, value: u32, c: char) -> bool {
        self.pending_underscore = false;
        self.exp_digits += 1;
        if !self.error && value >= 10 {
            // Hex digits inside a binary exponent.
            self.fail();
        }
        if !self.error {
            if value == 0 && self.exp_value == 0 {
                self.exp_leading_zeros += 1;
            } else {
                self.exp_value = self
                    .exp_value
                    .saturating_mul(10)
                    .saturating_add(value)
                    .min(1_000_000);
            }
        }
        self.push_builder_char(c);
        self.prev_digit = true;
        true
    }

    // ------------------------------------------------------------------
    // Builder / error bookkeeping

    fn fail(&mut self) {
        if !self.error {
            self.ensure_builder();
            self.error = true;
        }
    }

    fn ensure_builder(&mut self) {
        if self.builder.is_none() {
            self.builder = Some(self.reconstruct());
        }
    }

    fn push_builder_char(&mut self, c: char) {
        if let Some(builder) = self.builder.as_mut() {
            builder.push(c);
        }
    }

    fn push_builder_str(&mut self, s: &str) {
        if let Some(builder) = self.builder.as_mut() {
            builder.push_str(s);
        }
    }

    /// Rebuilds the exact token text from the numeric state. Only valid
    /// while no information has been lost, which is why the builder is
    /// allocated at the first lossy event.
    fn reconstruct(&self) -> String {
        let mut out = String::new();
        if let Some(sign) = self.sign {
            out.push(sign);
        }
        match self.radix {
            16 => {
                out.push('0');
                out.push(self.radix_symbol.unwrap_or('x'));
            }
            2 => {
                out.push('0');
                out.push(self.radix_symbol.unwrap_or('b'));
            }
            8 => out.push('0'),
            _ => {}
        }
        let mut digits = "0".repeat(self.leading_zeros as usize);
        if self.mantissa != 0 {
            digits.push_str(&format_radix(
                self.mantissa.unsigned_abs(),
                self.radix,
                self.hex_upper.unwrap_or(false),
            ));
        }
        for _ in 0..self.pending_zeros {
            digits.push('0');
        }
        if self.dot_position >= 0 {
            let pos = usize::try_from(self.dot_position)
                .unwrap_or_else(|_| digits.len())
                .min(digits.len());
            digits.insert(pos, '.');
        }
        out.push_str(&digits);
        if let Some(symbol) = self.exp_symbol {
            out.push(symbol);
            if let Some(sign) = self.exp_sign {
                out.push(sign);
            }
            for _ in 0..self.exp_leading_zeros {
                out.push('0');
            }
            if self.exp_value != 0 {
                out.push_str(&self.exp_value.to_string());
            }
        }
        out
    }

    fn token_text(&self) -> String {
        self.builder
            .clone()
            .unwrap_or_else(|| self.reconstruct())
    }

    fn format_error(&self) -> ScanError {
        ScanError::NumberFormat {
            text: self.token_text(),
            radix: self.radix,
        }
    }

    fn check(&self) -> ScanResult<()> {
        let no_digits = self.digits_total == 0 && self.special.is_none();
        let empty_exponent = self.in_exponent && self.exp_digits == 0;
        if self.error || self.pending_underscore || no_digits || empty_exponent {
            return Err(self.format_error());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Finalization

    /// The accumulated value as `i64`.
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`] for malformed, fractional,
    /// exponent-bearing or out-of-range tokens.
    pub fn into_i64(self) -> ScanResult<i64> {
        self.check()?;
        if self.is_floating() || self.overflow || self.special.is_some() {
            return Err(self.format_error());
        }
        if self.sign == Some('-') {
            Ok(self.mantissa)
        } else if self.mantissa == i64::MIN {
            Err(self.format_error())
        } else {
            Ok(-self.mantissa)
        }
    }

    /// The accumulated value as `i32`.
    ///
    /// # Errors
    ///
    /// As [`into_i64`](Self::into_i64).
    pub fn into_i32(self) -> ScanResult<i32> {
        self.check()?;
        if self.is_floating() || self.overflow || self.special.is_some() {
            return Err(self.format_error());
        }
        let value = if self.sign == Some('-') {
            self.mantissa
        } else if self.mantissa == i64::MIN {
            return Err(self.format_error());
        } else {
            -self.mantissa
        };
        match i32::try_from(value) {
            Ok(v) => Ok(v),
            Err(_) => Err(self.format_error()),
        }
    }

    /// The accumulated value as `f64`, composed directly from the
    /// mantissa, scale and exponent: via the power-of-ten table for
    /// radix 10, via bit assembly for radices 2/8/16.
    ///
    /// # Errors
    ///
    /// [`ScanError::NumberFormat`] for malformed tokens.
    #[allow(clippy::cast_precision_loss)]
    pub fn into_f64(self) -> ScanResult<f64> {
        if let Some(special) = self.special {
            if self.error || self.pending_underscore {
                return Err(self.format_error());
            }
            return Ok(special);
        }
        self.check()?;
        let negative = self.sign == Some('-');
        if self.mantissa == 0 {
            return Ok(if negative { -0.0 } else { 0.0 });
        }
        let exp_applied = {
            let magnitude = i32::try_from(self.exp_value).unwrap_or(i32::MAX);
            if self.exp_sign == Some('-') {
                -magnitude
            } else {
                magnitude
            }
        };
        let value = match self.radix {
            10 => {
                let magnitude = -(self.mantissa as f64);
                let value = scale10(magnitude, exp_applied.saturating_add(self.scale));
                if negative { -value } else { value }
            }
            _ => {
                let bits = bits_per_digit(self.radix);
                let e2 = exp_applied.saturating_add(bits.saturating_mul(self.scale));
                compose_pow2(self.mantissa.unsigned_abs(), e2, negative)
            }
        };
        Ok(value)
    }

    /// The accumulated value as `f32` (narrowed from the `f64`
    /// composition).
    ///
    /// # Errors
    ///
    /// As [`into_f64`](Self::into_f64).
    #[allow(clippy::cast_possible_truncation)]
    pub fn into_f32(self) -> ScanResult<f32> {
        let value = self.into_f64()?;
        Ok(value as f32)
    }
}

impl NumberParser for TypedNumberParser {
    fn sign(&mut self, c: char) -> bool {
        self.sign = Some(c);
        if c == '-' {
            self.min = self.min_negative;
        }
        self.prev_digit = false;
        true
    }

    fn radix(&mut self, probed: u32, symbol: char) -> u32 {
        let applied = self.mode.apply(probed);
        if applied != 0 {
            self.radix = applied;
            if probed != 8 {
                self.radix_symbol = Some(symbol);
            }
            if self.builder.is_some() {
                self.push_builder_char('0');
                if probed != 8 {
                    self.push_builder_char(symbol);
                }
            }
        }
        applied
    }

    fn digit(&mut self, value: u32, c: char) -> bool {
        if self.in_exponent {
            return self.exponent_digit(value, c);
        }
        self.digits_total += 1;
        self.pending_underscore = false;
        if self.special.is_some() {
            // Digits after NaN/Infinity make the whole token malformed.
            self.fail();
        }
        if !self.error {
            if self.radix == 16 && c.is_ascii_alphabetic() {
                let upper = c.is_ascii_uppercase();
                match self.hex_upper {
                    None => self.hex_upper = Some(upper),
                    Some(seen) if seen != upper => self.ensure_builder(),
                    Some(_) => {}
                }
            }
            if value >= self.radix {
                // Digit beyond the applied radix, seen thanks to the
                // probing-radix overshoot.
                self.fail();
            }
        }
        if !self.error {
            self.accumulate(value);
        }
        self.push_builder_char(c);
        self.prev_digit = true;
        true
    }

    fn dot(&mut self) -> bool {
        if self.integer_target() || self.in_exponent {
            return false;
        }
        if self.error {
            self.push_builder_char('.');
            self.prev_digit = false;
            return true;
        }
        if self.dot_position >= 0 {
            return false;
        }
        if self.pending_underscore {
            self.fail();
            self.pending_underscore = false;
        }
        self.dot_position = i32::try_from(self.digits_total).unwrap_or(i32::MAX);
        self.push_builder_char('.');
        self.prev_digit = false;
        true
    }

    fn exponent(&mut self, symbol: char, sign: Option<char>) -> bool {
        if self.integer_target() || self.in_exponent {
            return false;
        }
        if self.digits_total == 0 && !self.error {
            return false;
        }
        if self.pending_underscore {
            self.fail();
            self.pending_underscore = false;
        }
        self.in_exponent = true;
        self.exp_symbol = Some(symbol);
        self.exp_sign = sign;
        self.prev_digit = false;
        self.push_builder_char(symbol);
        if let Some(s) = sign {
            self.push_builder_char(s);
        }
        true
    }

    fn special_candidate(&mut self, c: char) -> Option<&'static str> {
        if c == '_' {
            return self.allow_underscore.then_some("_");
        }
        if !self.allow_specials || self.digits_total > 0 || self.dot_position >= 0 {
            return None;
        }
        match c {
            'N' => Some("NaN"),
            'I' => Some("Infinity"),
            _ => None,
        }
    }

    fn special(&mut self, text: &str) {
        match text {
            "_" => {
                // Separators need a digit on both sides; the right-hand
                // side is checked at finalization.
                if self.prev_digit {
                    self.ensure_builder();
                } else {
                    self.fail();
                }
                self.push_builder_str("_");
                self.pending_underscore = true;
                self.prev_digit = false;
            }
            "NaN" => {
                self.special = Some(f64::NAN);
                self.ensure_builder();
                self.push_builder_str(text);
            }
            "Infinity" => {
                let infinity = if self.sign == Some('-') {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                };
                self.special = Some(infinity);
                self.ensure_builder();
                self.push_builder_str(text);
            }
            _ => {}
        }
    }
}

fn format_radix(mut value: u64, radix: u32, upper: bool) -> String {
    let mut digits = Vec::new();
    let radix = u64::from(radix);
    while value > 0 {
        #[allow(clippy::cast_possible_truncation)]
        let d = (value % radix) as u32;
        let c = char::from_digit(d, 16).unwrap_or('0');
        digits.push(if upper { c.to_ascii_uppercase() } else { c });
        value /= radix;
    }
    digits.iter().rev().collect()
}

fn bits_per_digit(radix: u32) -> i32 {
    match radix {
        2 => 1,
        8 => 3,
        _ => 4,
    }
}

static POW10: [f64; 309] = build_pow10();

const fn build_pow10() -> [f64; 309] {
    let mut table = [1.0_f64; 309];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] * 10.0;
        i += 1;
    }
    table
}

/// Scales a positive magnitude by `10^e` using the power table, saturating
/// to infinity on overflow and flushing to (sub)normal zero territory on
/// underflow.
fn scale10(magnitude: f64, e: i32) -> f64 {
    if e >= 0 {
        if e > 308 {
            return f64::INFINITY;
        }
        magnitude * POW10[e.unsigned_abs() as usize]
    } else {
        let p = e.unsigned_abs() as usize;
        if p <= 308 {
            magnitude / POW10[p]
        } else if p - 308 <= 308 {
            // The near-underflow band goes through two divisions so that
            // subnormals form naturally.
            (magnitude / POW10[308]) / POW10[p - 308]
        } else {
            0.0
        }
    }
}

/// Assembles `magnitude * 2^e2` into an IEEE-754 double with
/// round-to-nearest, ties-to-even.
fn compose_pow2(magnitude: u64, e2: i32, negative: bool) -> f64 {
    debug_assert!(magnitude != 0);
    let sign_bit = if negative { 1_u64 << 63 } else { 0 };
    let infinity = f64::from_bits(sign_bit | 0x7FF0_0000_0000_0000);
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let msb = 63 - magnitude.leading_zeros() as i32;
    let mut e = e2.saturating_add(msb);
    if e > 1023 {
        return infinity;
    }
    if e < -1075 {
        return f64::from_bits(sign_bit);
    }
    if e >= -1022 {
        let mut significand = shift_round(magnitude, msb - 52);
        if significand >= 1_u64 << 53 {
            significand >>= 1;
            e += 1;
            if e > 1023 {
                return infinity;
            }
        }
        #[allow(clippy::cast_sign_loss)]
        let biased = (e + 1023) as u64;
        f64::from_bits(sign_bit | (biased << 52) | (significand & ((1_u64 << 52) - 1)))
    } else {
        // Subnormal: the fraction is magnitude * 2^(e2 + 1074); a carry out
        // of the rounding lands exactly on the minimum normal encoding.
        let fraction = shift_round(magnitude, -(e2 + 1074));
        f64::from_bits(sign_bit | fraction)
    }
}

/// Shifts right by `shift` with round-to-nearest, ties-to-even; negative
/// shifts are plain left shifts.
fn shift_round(magnitude: u64, shift: i32) -> u64 {
    if shift <= 0 {
        return magnitude << shift.unsigned_abs();
    }
    if shift > 64 {
        return 0;
    }
    let shift = shift.unsigned_abs();
    let wide = u128::from(magnitude);
    let half = 1_u128 << (shift - 1);
    let remainder = wide & ((1_u128 << shift) - 1);
    #[allow(clippy::cast_possible_truncation)]
    let shifted = (wide >> shift) as u64;
    if remainder > half || (remainder == half && shifted & 1 == 1) {
        shifted + 1
    } else {
        shifted
    }
}
