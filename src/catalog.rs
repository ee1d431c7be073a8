use bevy::utils::HashMap;

use crate::error::MarkerError;

/// Maps marker numbers to the template that is spawned for them.
///
/// Numbers without an entry fall back to the default template.
#[derive(Clone, Debug)]
pub struct PrefabCatalog<T> {
    default: T,
    by_number: HashMap<i64, T>,
}

impl<T> PrefabCatalog<T> {
    pub fn new(default: T) -> Self {
        Self {
            default,
            by_number: HashMap::default(),
        }
    }

    pub fn with(mut self, number: i64, template: T) -> Self {
        self.insert(number, template);
        self
    }

    pub fn insert(&mut self, number: i64, template: T) -> Option<T> {
        self.by_number.insert(number, template)
    }

    pub fn default_template(&self) -> &T {
        &self.default
    }

    pub fn get(&self, number: i64) -> Option<&T> {
        self.by_number.get(&number)
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    /// Looks up the template for a marker id.
    ///
    /// The id must be a decimal marker number, QR payloads that are not numbers fail with
    /// [`MarkerError::InvalidMarkerId`]. Negative numbers are valid ids and fall back to the
    /// default template unless mapped.
    pub fn resolve(&self, id: &str) -> Result<&T, MarkerError> {
        let number = id
            .parse::<i64>()
            .map_err(|_| MarkerError::InvalidMarkerId(id.to_owned()))?;
        Ok(self.get(number).unwrap_or(&self.default))
    }
}
