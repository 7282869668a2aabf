use serde::{Deserialize, Serialize};

/// Step that installs declared dependencies from a manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallStep {
    /// Dependency manifest at the project root, e.g. `requirements.txt`
    pub manifest: String,
    /// Shell command run once the manifest is in the image
    pub command: String,
}

/// Template data for one ecosystem tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EcosystemProfile {
    pub base_image: String,

    /// Setup commands, emitted as one `RUN` joined with `&&`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Launch command in exec form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<Vec<String>>,

    /// Patterns appended to the global ignore list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallStep>,
}

impl EcosystemProfile {
    pub fn setup_command(&self) -> Option<String> {
        if self.run.is_empty() {
            None
        } else {
            Some(self.run.join(" && "))
        }
    }
}
