use decimal_calc as dc;
use decimal_calc::keys::{parse_script, Key};
use decimal_calc::Calculator;
use std::cell::RefCell;
use std::rc::Rc;

fn run(calc: &mut Calculator, script: &str) {
    for key in parse_script(script).unwrap() {
        let _ = calc.press(key);
    }
}

#[test]
fn test_precedence() {
    assert_eq!(dc::eval("2+3*4").unwrap(), "14");
    assert_eq!(dc::eval("10-4/2*3").unwrap(), "4");
}

#[test]
fn test_division() {
    assert_eq!(dc::eval("10/4").unwrap(), "2.5");
    assert_eq!(dc::eval("1/3").unwrap(), "0.333333333333333");
}

#[test]
fn test_chaining_reuses_result() {
    let mut calc = Calculator::default();
    run(&mut calc, "2+2=");
    assert_eq!(calc.display(), "4");
    run(&mut calc, "*3=");
    assert_eq!(calc.display(), "12");
}

#[test]
fn test_digit_after_result_starts_new_expression() {
    let mut calc = Calculator::default();
    run(&mut calc, "2+2=");
    run(&mut calc, "5+1");
    assert_eq!(calc.display(), "5+1");
    run(&mut calc, "=");
    assert_eq!(calc.display(), "6");
}

#[test]
fn test_results_beyond_machine_range() {
    assert_eq!(
        dc::eval("1000000000000000*1000000000000000").unwrap(),
        "1.00000000e+30"
    );
    assert_eq!(
        dc::eval("123456789012345678901234567890+1").unwrap(),
        "1.23456789e+29"
    );
}

#[test]
fn test_tiny_results_keep_precision() {
    let mut calc = Calculator::default();
    run(&mut calc, "1/3=/1000000000000000=");
    assert_eq!(
        calc.input().tokens()[0].to_string(),
        "0.000000000000000333333333333333"
    );
    assert_eq!(calc.display(), "3.33333333e-16");
    run(&mut calc, "/1000=");
    assert_eq!(
        calc.input().tokens()[0].to_string(),
        "0.000000000000000000333333333333333"
    );
}

#[test]
fn test_very_long_literal_while_typing() {
    let mut calc = Calculator::default();
    run(&mut calc, "123456789012345678901234567890");
    assert_eq!(calc.display(), "1.23456789e+29");
}

#[test]
fn test_display_while_typing() {
    let mut calc = Calculator::default();
    assert_eq!(calc.display(), "0");
    run(&mut calc, "12+3.");
    assert_eq!(calc.display(), "12+3.");
    run(&mut calc, "[Backspace][Backspace][Backspace]");
    assert_eq!(calc.display(), "12");
    run(&mut calc, "[Escape]");
    assert_eq!(calc.display(), "0");
}

#[test]
fn test_long_result_in_scientific_notation() {
    assert_eq!(dc::eval("99999999*99999999").unwrap(), "9.99999980e+15");
}

#[test]
fn test_long_literal_while_typing() {
    let mut calc = Calculator::default();
    run(&mut calc, "123456789012345");
    assert_eq!(calc.display(), "1.23456789e+14");
    assert_eq!(calc.input().current(), "123456789012345");
}

#[test]
fn test_incomplete_evaluation_is_noop() {
    let mut calc = Calculator::default();
    run(&mut calc, "5");
    assert_eq!(calc.evaluate().unwrap(), None);
    assert_eq!(calc.display(), "5");
    assert_eq!(calc.input().current(), "5");
    assert!(calc.input().tokens().is_empty());

    run(&mut calc, "+");
    assert_eq!(calc.evaluate().unwrap(), None);
    assert_eq!(calc.display(), "5+");
    assert_eq!(calc.input().tokens().len(), 2);
}

#[test]
fn test_render_callback_sees_every_change() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut calc = Calculator::default().with_renderer(move |d: &str| {
        sink.borrow_mut().push(d.to_string());
    });
    run(&mut calc, "1++2=");
    // the rejected second `+` does not re-render
    assert_eq!(*seen.borrow(), vec!["1", "1+", "1+2", "3"]);
}

#[test]
fn test_named_keys() {
    let mut calc = Calculator::default();
    for key in ["7", "*", "6", "Enter"] {
        if let Some(k) = Key::from_name(key) {
            let _ = calc.press(k);
        }
    }
    assert_eq!(calc.display(), "42");
}
