//! Personal-desktop calculator.

mod engine;

pub use engine::{format_number, keyboard_key, BinaryOp, CalcKey, CalculatorState, GHOST_DISPLAY};

use leptos::ev::KeyboardEvent;
use leptos::*;

#[derive(Clone, Copy)]
struct CalcKeySpec {
    id: &'static str,
    label: &'static str,
    class_name: &'static str,
    key: CalcKey,
}

const fn key_spec(id: &'static str, label: &'static str, class_name: &'static str, key: CalcKey) -> CalcKeySpec {
    CalcKeySpec {
        id,
        label,
        class_name,
        key,
    }
}

const CALC_KEYS: [CalcKeySpec; 19] = [
    key_spec("ac", "AC", "util", CalcKey::Clear),
    key_spec("sign", "+/-", "util", CalcKey::ToggleSign),
    key_spec("percent", "%", "util", CalcKey::Percent),
    key_spec("divide", "\u{00f7}", "operator", CalcKey::Binary(BinaryOp::Divide)),
    key_spec("7", "7", "digit", CalcKey::Digit('7')),
    key_spec("8", "8", "digit", CalcKey::Digit('8')),
    key_spec("9", "9", "digit", CalcKey::Digit('9')),
    key_spec("mul", "\u{00d7}", "operator", CalcKey::Binary(BinaryOp::Multiply)),
    key_spec("4", "4", "digit", CalcKey::Digit('4')),
    key_spec("5", "5", "digit", CalcKey::Digit('5')),
    key_spec("6", "6", "digit", CalcKey::Digit('6')),
    key_spec("sub", "\u{2212}", "operator", CalcKey::Binary(BinaryOp::Subtract)),
    key_spec("1", "1", "digit", CalcKey::Digit('1')),
    key_spec("2", "2", "digit", CalcKey::Digit('2')),
    key_spec("3", "3", "digit", CalcKey::Digit('3')),
    key_spec("add", "+", "operator", CalcKey::Binary(BinaryOp::Add)),
    key_spec("0", "0", "digit wide", CalcKey::Digit('0')),
    key_spec("dot", ".", "digit", CalcKey::Decimal),
    key_spec("eq", "=", "operator", CalcKey::Equals),
];

#[component]
pub fn CalculatorApp() -> impl IntoView {
    let calc = create_rw_signal(CalculatorState::default());

    let on_keydown = move |ev: KeyboardEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
            return;
        }
        if let Some(key) = keyboard_key(&ev.key()) {
            ev.prevent_default();
            calc.update(|state| state.apply(key));
        }
    };

    view! {
        <div class="app-shell app-calculator-shell" tabindex="0" on:keydown=on_keydown>
            <div
                class="calc-display-panel"
                data-ghost=move || if calc.with(|s| s.display_text() == GHOST_DISPLAY) { "on" } else { "off" }
            >
                <div class="calc-expression" aria-live="off">{move || calc.with(|s| s.expression_text())}</div>
                <div class="calc-display" role="status" aria-live="polite">
                    {move || calc.with(|s| s.display_text().to_string())}
                </div>
            </div>
            <div class="calc-keypad" role="group" aria-label="Calculator keys">
                <For each=move || CALC_KEYS.to_vec() key=|spec| spec.id let:spec>
                    <button
                        type="button"
                        class=format!("calc-key {}", spec.class_name)
                        on:click=move |_| calc.update(|state| state.apply(spec.key))
                    >
                        {spec.label}
                    </button>
                </For>
            </div>
        </div>
    }
}
