use hvac_toolbox::app;
use hvac_toolbox::config::Config;
use hvac_toolbox::ui_cli::Console;

fn run_script(script: &str, cfg: &mut Config) -> String {
    let mut tr = app::translator_for(cfg, "en");
    let mut console = Console::new(script.as_bytes(), Vec::new());
    app::run(&mut console, cfg, &mut tr, false).expect("session");
    String::from_utf8(console.into_output()).expect("utf8")
}

#[test]
fn gas_charge_with_default_refrigerant() {
    let mut cfg = Config::default();
    let out = run_script("1\n12000\n10\n\n0\n", &mut cfg);
    assert!(out.contains("• TOTAL: 1060g (1.06kg)"), "{out}");
    assert!(out.contains("R410A"), "{out}");
}

#[test]
fn invalid_input_reports_error_and_keeps_running() {
    let mut cfg = Config::default();
    let out = run_script("2\n\n20\n5\n3\n2\n1\n\n0\n", &mut cfg);
    assert!(out.contains("pipe diameter"), "{out}");
    assert!(out.contains("1 Bar = 14.50 PSI"), "{out}");
}

#[test]
fn unknown_menu_choice_is_retried() {
    let mut cfg = Config::default();
    let out = run_script("9\n3\ncelsius-fahrenheit\n100\n0\n", &mut cfg);
    assert!(out.contains("100°C = 212.0°F"), "{out}");
}

#[test]
fn settings_switch_language_in_memory() {
    let mut cfg = Config::default();
    let out = run_script("4\n4\n1\n12000\n10\n\n0\n", &mut cfg);
    assert_eq!(cfg.language, "pt");
    assert!(out.contains("Carga de Gás Recomendada:"), "{out}");
}

#[test]
fn end_of_input_exits_cleanly() {
    let mut cfg = Config::default();
    let out = run_script("", &mut cfg);
    assert!(!out.is_empty());
}
