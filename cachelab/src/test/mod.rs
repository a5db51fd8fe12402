mod config_tests;
mod examples;
mod trace_tests;

static INIT: std::sync::Once = std::sync::Once::new();

pub fn init_test() {
    INIT.call_once(|| {
        env_logger::builder().is_test(true).init();
    });
}
