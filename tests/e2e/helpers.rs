use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const CONFIG_FILE_NAME: &str = ".license-check-node.json";

pub struct TestProject {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_license-check-node").to_string();

        Self { dir, binary_path }
    }

    /// Create a Node project directory with a package.json and return the manifest path.
    pub fn init_node_project(&self, name: &str, allowed: Option<&[&str]>) -> PathBuf {
        let project_path = self.dir.path().join(name);
        fs::create_dir_all(&project_path).expect("Failed to create project dir");
        fs::write(
            project_path.join("package.json"),
            format!("{{\"name\": \"{}\", \"version\": \"1.0.0\"}}\n", name),
        )
        .expect("Failed to write package.json");

        if let Some(allowed) = allowed {
            let config = serde_json::json!({ "allowedLicenses": allowed });
            fs::write(project_path.join(CONFIG_FILE_NAME), config.to_string())
                .expect("Failed to write allow list");
        }

        project_path.join("package.json")
    }

    /// Install a fake license-checker that prints `license.csv` from the
    /// current directory, or fails when that file is missing.
    pub fn fake_scanner(&self) -> PathBuf {
        let path = self.dir.path().join("fake-license-checker");
        fs::write(
            &path,
            "#!/bin/sh\n\
             [ \"$1\" = \"--csv\" ] || { echo \"expected --csv\" >&2; exit 2; }\n\
             [ -f license.csv ] || { echo \"no package data\" >&2; exit 1; }\n\
             cat license.csv\n",
        )
        .expect("Failed to write fake scanner");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake scanner executable");
        path
    }

    /// Canned scanner output for a project.
    pub fn set_licenses(&self, manifest: &Path, licenses: &[&str]) {
        let mut csv = String::from("\"module name\",\"license\",\"repository\"\n");
        for (i, license) in licenses.iter().enumerate() {
            csv.push_str(&format!("\"dep-{}@1.0.0\",\"{}\",\"https://example.com\"\n", i, license));
        }
        let directory = manifest.parent().expect("manifest has a parent");
        fs::write(directory.join("license.csv"), csv).expect("Failed to write license.csv");
    }

    pub fn run_checker(&self, scanner: &Path, args: &[&Path]) -> std::process::Output {
        Command::new(&self.binary_path)
            .arg("--scanner")
            .arg(scanner)
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run license-check-node")
    }
}
