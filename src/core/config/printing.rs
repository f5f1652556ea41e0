use crate::core::config::data::{path_display, Config};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset, using {})", self.base_url()),
        }
        match self.request_timeout_secs {
            Some(secs) => println!("  timeout: {secs}s"),
            None => println!(
                "  timeout: (unset, using {}s)",
                self.request_timeout().as_secs()
            ),
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset)"),
        }
        match self.suggestions_enabled() {
            true => println!("  suggestions: on"),
            false => println!("  suggestions: off"),
        }
        if let Ok(path) = Self::config_path() {
            println!("  file: {}", path_display(path));
        }
    }
}
