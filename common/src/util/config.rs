use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            router: RouterConfig::default(),
            input: InputConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RouterConfig {
    #[serde(default = "default_steiner_refinement")]
    pub steiner_refinement: bool,
    #[serde(default = "default_rectilinearize")]
    pub rectilinearize: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            steiner_refinement: default_steiner_refinement(),
            rectilinearize: default_rectilinearize(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_pin_file")]
    pub pin_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default = "default_image_file")]
    pub image_file: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pin_file: default_pin_file(),
            output_file: default_output_file(),
            image_file: default_image_file(),
        }
    }
}

fn default_steiner_refinement() -> bool {
    true
}

fn default_rectilinearize() -> bool {
    true
}

fn default_pin_file() -> String {
    "inputs/case0.pins".to_string()
}

fn default_output_file() -> String {
    "output/routed.txt".to_string()
}

fn default_image_file() -> String {
    "output/routed.png".to_string()
}
