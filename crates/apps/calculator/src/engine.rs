use serde::{Deserialize, Serialize};

/// Display value that replaces the easter-egg input.
pub const GHOST_DISPLAY: &str = "GHOST";
const GHOST_TRIGGER: &str = "31337";
const ERROR_DISPLAY: &str = "ERROR";
const MAX_ENTRY_CHARS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "\u{2212}",
            Self::Multiply => "\u{00d7}",
            Self::Divide => "\u{00f7}",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalcKey {
    Digit(char),
    Decimal,
    Clear,
    ToggleSign,
    Percent,
    Binary(BinaryOp),
    Equals,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    display: String,
    previous: Option<f64>,
    pending_op: Option<BinaryOp>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            previous: None,
            pending_op: None,
        }
    }
}

impl CalculatorState {
    pub fn apply(&mut self, key: CalcKey) {
        match key {
            CalcKey::Digit(digit) => self.input_digit(digit),
            CalcKey::Decimal => self.input_decimal(),
            CalcKey::Clear => *self = Self::default(),
            CalcKey::ToggleSign => self.map_display(|value| -value),
            CalcKey::Percent => self.map_display(|value| value / 100.0),
            CalcKey::Binary(op) => self.set_pending_operation(op),
            CalcKey::Equals => self.equals(),
        }
        if self.display == GHOST_TRIGGER {
            self.display = GHOST_DISPLAY.to_string();
        }
    }

    pub fn display_text(&self) -> &str {
        &self.display
    }

    pub fn expression_text(&self) -> String {
        match (self.previous, self.pending_op) {
            (Some(prev), Some(op)) => format!("{} {}", format_number(prev), op.symbol()),
            _ => String::new(),
        }
    }

    fn is_sticky(&self) -> bool {
        self.display == GHOST_DISPLAY || self.display == ERROR_DISPLAY
    }

    fn current_value(&self) -> Option<f64> {
        self.display.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        if self.is_sticky() || self.display == "0" {
            self.display = digit.to_string();
            return;
        }
        if self.display.len() < MAX_ENTRY_CHARS {
            self.display.push(digit);
        }
    }

    fn input_decimal(&mut self) {
        if self.is_sticky() {
            self.display = "0.".to_string();
            return;
        }
        if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn map_display(&mut self, f: impl FnOnce(f64) -> f64) {
        match self.current_value() {
            Some(value) => self.display = format_number(f(value)),
            None => self.display = ERROR_DISPLAY.to_string(),
        }
    }

    fn set_pending_operation(&mut self, op: BinaryOp) {
        if self.previous.is_some() {
            self.equals();
        }
        match self.current_value() {
            Some(value) => {
                self.previous = Some(value);
                self.pending_op = Some(op);
                self.display = "0".to_string();
            }
            None => {
                self.previous = None;
                self.pending_op = None;
                self.display = ERROR_DISPLAY.to_string();
            }
        }
    }

    fn equals(&mut self) {
        let (Some(lhs), Some(op)) = (self.previous, self.pending_op) else {
            return;
        };
        self.previous = None;
        self.pending_op = None;
        let Some(rhs) = self.current_value() else {
            self.display = ERROR_DISPLAY.to_string();
            return;
        };
        self.display = match apply_binary(lhs, op, rhs) {
            Some(result) => format_number(result),
            None => ERROR_DISPLAY.to_string(),
        };
    }
}

pub fn keyboard_key(key: &str) -> Option<CalcKey> {
    match key {
        "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => {
            key.chars().next().map(CalcKey::Digit)
        }
        "." | "," => Some(CalcKey::Decimal),
        "+" => Some(CalcKey::Binary(BinaryOp::Add)),
        "-" => Some(CalcKey::Binary(BinaryOp::Subtract)),
        "*" | "x" | "X" => Some(CalcKey::Binary(BinaryOp::Multiply)),
        "/" => Some(CalcKey::Binary(BinaryOp::Divide)),
        "%" => Some(CalcKey::Percent),
        "=" | "Enter" => Some(CalcKey::Equals),
        "Escape" | "Delete" => Some(CalcKey::Clear),
        "F9" => Some(CalcKey::ToggleSign),
        _ => None,
    }
}

fn apply_binary(lhs: f64, op: BinaryOp, rhs: f64) -> Option<f64> {
    let result = match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Subtract => lhs - rhs,
        BinaryOp::Multiply => lhs * rhs,
        BinaryOp::Divide => lhs / rhs,
    };
    result.is_finite().then_some(result)
}

pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }

    let mut text = format!("{value:.12}");
    while text.contains('.') && text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(state: &mut CalculatorState, keys: &[CalcKey]) {
        for key in keys {
            state.apply(*key);
        }
    }

    fn type_number(state: &mut CalculatorState, text: &str) {
        for ch in text.chars() {
            if ch == '.' {
                state.apply(CalcKey::Decimal);
            } else {
                state.apply(CalcKey::Digit(ch));
            }
        }
    }

    #[test]
    fn digits_replace_leading_zero() {
        let mut state = CalculatorState::default();
        type_number(&mut state, "007");
        assert_eq!(state.display_text(), "7");
        type_number(&mut state, ".5");
        assert_eq!(state.display_text(), "7.5");
        state.apply(CalcKey::Decimal);
        assert_eq!(state.display_text(), "7.5");
    }

    #[test]
    fn binary_operation_and_chaining() {
        let mut state = CalculatorState::default();
        type_number(&mut state, "12");
        state.apply(CalcKey::Binary(BinaryOp::Add));
        assert_eq!(state.display_text(), "0");
        assert_eq!(state.expression_text(), "12 +");
        type_number(&mut state, "30");
        state.apply(CalcKey::Binary(BinaryOp::Multiply));
        assert_eq!(state.expression_text(), "42 \u{00d7}");
        type_number(&mut state, "2");
        state.apply(CalcKey::Equals);
        assert_eq!(state.display_text(), "84");
        assert_eq!(state.expression_text(), "");
    }

    #[test]
    fn equals_without_pending_operation_is_noop() {
        let mut state = CalculatorState::default();
        type_number(&mut state, "5");
        state.apply(CalcKey::Equals);
        assert_eq!(state.display_text(), "5");
    }

    #[test]
    fn sign_and_percent_transform_display() {
        let mut state = CalculatorState::default();
        type_number(&mut state, "50");
        state.apply(CalcKey::ToggleSign);
        assert_eq!(state.display_text(), "-50");
        state.apply(CalcKey::Percent);
        assert_eq!(state.display_text(), "-0.5");
    }

    #[test]
    fn division_by_zero_shows_error_until_next_digit() {
        let mut state = CalculatorState::default();
        type_number(&mut state, "9");
        press_all(
            &mut state,
            &[
                CalcKey::Binary(BinaryOp::Divide),
                CalcKey::Digit('0'),
                CalcKey::Equals,
            ],
        );
        assert_eq!(state.display_text(), "ERROR");
        state.apply(CalcKey::Digit('4'));
        assert_eq!(state.display_text(), "4");
    }

    #[test]
    fn elite_number_turns_into_ghost() {
        let mut state = CalculatorState::default();
        type_number(&mut state, "31337");
        assert_eq!(state.display_text(), GHOST_DISPLAY);
        state.apply(CalcKey::Digit('1'));
        assert_eq!(state.display_text(), "1");
    }

    #[test]
    fn ghost_also_appears_as_a_result() {
        let mut state = CalculatorState::default();
        type_number(&mut state, "31336");
        state.apply(CalcKey::Binary(BinaryOp::Add));
        type_number(&mut state, "1");
        state.apply(CalcKey::Equals);
        assert_eq!(state.display_text(), GHOST_DISPLAY);
    }

    #[test]
    fn sign_on_ghost_is_an_error() {
        let mut state = CalculatorState::default();
        type_number(&mut state, "31337");
        state.apply(CalcKey::ToggleSign);
        assert_eq!(state.display_text(), "ERROR");
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = CalculatorState::default();
        type_number(&mut state, "8");
        press_all(&mut state, &[CalcKey::Binary(BinaryOp::Subtract), CalcKey::Clear]);
        assert_eq!(state, CalculatorState::default());
    }

    #[test]
    fn keyboard_mapping_covers_operators() {
        assert_eq!(keyboard_key("7"), Some(CalcKey::Digit('7')));
        assert_eq!(keyboard_key("Enter"), Some(CalcKey::Equals));
        assert_eq!(keyboard_key("x"), Some(CalcKey::Binary(BinaryOp::Multiply)));
        assert_eq!(keyboard_key("Escape"), Some(CalcKey::Clear));
        assert_eq!(keyboard_key("q"), None);
    }
}
