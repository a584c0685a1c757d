use std::collections::BTreeMap;

use crate::controller::GenerationController;
use crate::error::ApiError;

// app's shared state: one independent controller per feature
pub struct AppState {
    pub generators: BTreeMap<String, GenerationController>,
}

impl AppState {
    pub fn new(controllers: impl IntoIterator<Item = GenerationController>) -> Self {
        let generators = controllers
            .into_iter()
            .map(|c| (c.feature().name.clone(), c))
            .collect();
        Self { generators }
    }

    pub fn generator(&self, feature: &str) -> Result<&GenerationController, ApiError> {
        self.generators
            .get(feature)
            .ok_or_else(|| ApiError::UnknownFeature(feature.to_string()))
    }
}
