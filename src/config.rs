//! Generator settings.

/// Controls the shape of the generated translation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Header included at the top of the output. `None` emits no include.
    pub runtime_header: Option<String>,
    /// Wrap the root statements in `int main() { ... }`
    pub wrap_main: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            runtime_header: Some(String::from("javelin.h")),
            wrap_main: true,
        }
    }
}

impl Config {
    pub fn with_runtime_header(mut self, header: Option<String>) -> Self {
        self.runtime_header = header;
        self
    }

    pub fn with_wrap_main(mut self, wrap_main: bool) -> Self {
        self.wrap_main = wrap_main;
        self
    }
}
