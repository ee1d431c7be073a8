use bevy::utils::HashMap;

/// Scene objects spawned for markers, keyed by marker id.
///
/// Entries are never removed. A marker that was seen once is assumed to stay around for the
/// rest of the session, so the registry grows by one entry per distinct id.
#[derive(Clone, Debug)]
pub struct MarkerRegistry<O> {
    objects: HashMap<String, O>,
}

impl<O> Default for MarkerRegistry<O> {
    fn default() -> Self {
        Self {
            objects: HashMap::default(),
        }
    }
}

impl<O: Copy> MarkerRegistry<O> {
    pub fn get(&self, id: &str) -> Option<O> {
        self.objects.get(id).copied()
    }

    /// Returns the object for `id`, spawning it with `spawn` if the id is new.
    /// The flag is true when `spawn` ran.
    pub fn get_or_insert_with(&mut self, id: &str, spawn: impl FnOnce() -> O) -> (O, bool) {
        if let Some(object) = self.objects.get(id) {
            return (*object, false);
        }
        let object = spawn();
        self.objects.insert(id.to_owned(), object);
        (object, true)
    }
}

impl<O> MarkerRegistry<O> {
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &O)> {
        self.objects.iter().map(|(id, object)| (id.as_str(), object))
    }
}

/// The object that was placed most recently.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveMarker<O> {
    pub id: String,
    pub object: O,
}
