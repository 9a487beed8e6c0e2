pub mod errors;
pub mod context;
pub mod engine;
pub mod expression;
pub mod input;
pub mod display;
pub mod keys;

use tracing::{trace, warn};

use context::Context;
use errors::Result;
use expression::Operator;
use input::InputState;
use keys::Key;

pub use display::{format_for_display, ERROR_TEXT};
pub use errors::EvalError;

/// Receives the display string after every change.
pub trait Render {
    fn render(&mut self, display: &str);
}

impl<F: FnMut(&str)> Render for F {
    fn render(&mut self, display: &str) {
        (*self)(display)
    }
}

/// A calculator session: input state, evaluation options and the current display.
pub struct Calculator {
    ctx: Context,
    input: InputState,
    display: String,
    renderer: Option<Box<dyn Render>>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Context::default())
    }
}

impl Calculator {
    pub fn new(ctx: Context) -> Self {
        let input = InputState::new();
        let display = display::render(&input, &ctx);
        Self { ctx, input, display, renderer: None }
    }

    /// Install the render callback. It is not called until the next change.
    pub fn with_renderer<R: Render + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// What the screen currently shows.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Dispatch a key. Errors from `Evaluate` are already reflected on the display.
    pub fn press(&mut self, key: Key) -> Result<()> {
        trace!(?key, "key");
        match key {
            Key::Digit(c) => self.input_digit(c),
            Key::Operator(op) => self.input_operator(op),
            Key::Backspace => self.backspace(),
            Key::Clear => self.clear(),
            Key::Evaluate => return self.evaluate().map(|_| ()),
        }
        Ok(())
    }

    pub fn input_digit(&mut self, c: char) {
        if self.input.append_digit_or_point(c) {
            self.refresh();
        }
    }

    pub fn input_operator(&mut self, op: Operator) {
        if self.input.append_operator(op) {
            self.refresh();
        }
    }

    pub fn backspace(&mut self) {
        if self.input.backspace() {
            self.refresh();
        }
    }

    pub fn clear(&mut self) {
        self.input.reset();
        self.refresh();
    }

    /// Evaluate the expression typed so far.
    ///
    /// `Ok(None)`: fewer than three tokens, nothing changed.
    /// `Ok(Some(result))`: the expression collapsed to `result`.
    /// `Err(_)`: the display shows [`ERROR_TEXT`] and the input was cleared.
    pub fn evaluate(&mut self) -> Result<Option<String>> {
        let tokens = self.input.finalized();
        if !engine::is_complete(&tokens) {
            return Ok(None);
        }

        match engine::evaluate(&tokens, &self.ctx) {
            Ok(value) => {
                let result = engine::format_result(&value);
                self.input.collapse(result.clone());
                self.refresh();
                Ok(Some(result))
            }
            Err(e) => {
                warn!(error = %e, "evaluation failed");
                self.input.reset();
                self.show(ERROR_TEXT.to_string());
                Err(e)
            }
        }
    }

    fn refresh(&mut self) {
        let text = display::render(&self.input, &self.ctx);
        self.show(text);
    }

    fn show(&mut self, text: String) {
        self.display = text;
        if let Some(r) = self.renderer.as_mut() {
            r.render(&self.display);
        }
    }
}

/// Replay a keystroke script on a fresh calculator, evaluate, and return the display.
///
/// An evaluation failure is returned as the error rather than `"Error"`.
pub fn eval(script: &str) -> Result<String> {
    let keys = keys::parse_script(script)?;
    let mut calc = Calculator::default();
    for key in keys {
        calc.press(key)?;
    }
    calc.evaluate()?;
    Ok(calc.display().to_string())
}
