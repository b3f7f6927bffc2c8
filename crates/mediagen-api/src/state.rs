use mediagen_core::{Generator, MediaStore, MediagenConfig};

/// Shared service state: the blocking generator plus the in-memory store
/// of completed results.
pub struct AppState {
    pub generator: Generator,
    pub store: MediaStore,
    pub token_configured: bool,
}

impl AppState {
    pub fn new(config: MediagenConfig) -> Self {
        let generator = Generator::new(&config);
        let token_configured = generator.has_token();
        Self {
            generator,
            store: MediaStore::new(),
            token_configured,
        }
    }
}
