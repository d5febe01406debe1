/// Hosted project the catalog and admin sign-in live in.
#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub api_key: String,
    pub collection: String,
}

/// Backend selection, fixed at build time.
#[derive(Clone, Debug)]
pub enum BackendConfig {
    Firebase(FirebaseConfig),
    /// In-browser store seeded with demo data, for local development.
    Demo { admin_email: String, admin_password: String },
}

const DEFAULT_COLLECTION: &str = "programs";

impl BackendConfig {
    /// Read `CATALOG_FIREBASE_PROJECT`, `CATALOG_FIREBASE_API_KEY` and
    /// `CATALOG_COLLECTION` from the build environment.
    pub fn from_build_env() -> Self {
        match (
            option_env!("CATALOG_FIREBASE_PROJECT"),
            option_env!("CATALOG_FIREBASE_API_KEY"),
        ) {
            (Some(project_id), Some(api_key)) if !project_id.is_empty() => {
                BackendConfig::Firebase(FirebaseConfig {
                    project_id: project_id.to_string(),
                    api_key: api_key.to_string(),
                    collection: option_env!("CATALOG_COLLECTION")
                        .unwrap_or(DEFAULT_COLLECTION)
                        .to_string(),
                })
            }
            _ => BackendConfig::Demo {
                admin_email: option_env!("CATALOG_DEMO_ADMIN")
                    .unwrap_or("admin@localhost")
                    .to_string(),
                admin_password: option_env!("CATALOG_DEMO_PASSWORD")
                    .unwrap_or("admin")
                    .to_string(),
            },
        }
    }
}
