use std::path::PathBuf;

pub const CLIENT_FILE: &str = "client.csv";
pub const CAMPAIGN_FILE: &str = "campaign.csv";
pub const ECONOMICS_FILE: &str = "economics.csv";

/// Where the pipeline reads archives from and writes its three tables to.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("files/input"),
            output_dir: PathBuf::from("files/output"),
        }
    }
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn client_path(&self) -> PathBuf {
        self.output_dir.join(CLIENT_FILE)
    }

    pub fn campaign_path(&self) -> PathBuf {
        self.output_dir.join(CAMPAIGN_FILE)
    }

    pub fn economics_path(&self) -> PathBuf {
        self.output_dir.join(ECONOMICS_FILE)
    }
}
