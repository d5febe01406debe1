pub mod auth;
pub mod firestore;
pub mod http;
pub mod types;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use catalog_common::backend::{CatalogStore, IdentityProvider};
use catalog_common::memory::{MemoryIdentity, MemoryStore};
use catalog_common::types::ProgramFields;
use catalog_common::wire::firestore::CollectionPath;
use catalog_common::{link, sync};

use crate::browser;
use crate::state::AppSignal;
use types::BackendConfig;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// The two hosted services, behind their traits.
#[derive(Clone)]
pub struct Backend {
    pub store: Rc<dyn CatalogStore>,
    pub identity: Rc<dyn IdentityProvider>,
}

thread_local! {
    static BACKEND: RefCell<Option<Backend>> = const { RefCell::new(None) };
}

pub fn backend() -> Option<Backend> {
    BACKEND.with(|cell| cell.borrow().clone())
}

fn build_backend(config: BackendConfig) -> Backend {
    match config {
        BackendConfig::Firebase(fb) => {
            tracing::info!(
                "Using hosted catalog {}/{}",
                fb.project_id,
                fb.collection
            );
            let auth = Rc::new(auth::FirebaseAuth::new(fb.api_key));
            let store = firestore::FirestoreStore::new(
                CollectionPath::new(fb.project_id, fb.collection),
                auth.clone(),
            );
            Backend {
                store: Rc::new(store),
                identity: auth,
            }
        }
        BackendConfig::Demo {
            admin_email,
            admin_password,
        } => {
            tracing::info!("No hosted project configured, using demo catalog");
            Backend {
                store: Rc::new(MemoryStore::with_programs(demo_programs())),
                identity: Rc::new(
                    MemoryIdentity::new().with_account(&admin_email, &admin_password),
                ),
            }
        }
    }
}

fn demo_programs() -> Vec<ProgramFields> {
    vec![
        ProgramFields {
            title: "Port Lens".into(),
            description: "Fast TCP port scanner with service banners.".into(),
            platform: "CLI".into(),
            version: "0.4.1".into(),
            file_url: "https://github.com/example/port-lens/releases".into(),
            icon_url: "https://placehold.co/600x240?text=Port+Lens".into(),
        },
        ProgramFields {
            title: "Hex Sorter".into(),
            description: "Drag-and-drop binary diff viewer.".into(),
            platform: "Windows".into(),
            version: String::new(),
            file_url: "https://downloads.example.com/hex-sorter.zip".into(),
            icon_url: "https://placehold.co/600x240?text=Hex+Sorter".into(),
        },
    ]
}

pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    let backend = build_backend(BackendConfig::from_build_env());
    BACKEND.with(|cell| *cell.borrow_mut() = Some(backend.clone()));

    // Lives as long as the page.
    sync::watch_identity(AppSignal, &*backend.identity).detach();

    let linked = browser::current_href().and_then(|href| link::program_param(&href));
    wasm_bindgen_futures::spawn_local(async move {
        let effects = sync::bootstrap(&AppSignal, &*backend.store, linked.as_deref()).await;
        browser::apply_effects(effects);
    });
}
