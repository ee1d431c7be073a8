use bevy::transform::components::Transform;

/// The scene graph the marker objects live in.
///
/// Objects created through [`MarkerScene::instantiate`] are owned by the scene, the reconciler
/// only keeps their handles.
pub trait MarkerScene {
    type Template: Clone + PartialEq;
    type Object: Copy + PartialEq;

    fn instantiate(&mut self, template: &Self::Template, id: &str) -> Self::Object;

    fn set_visible(&mut self, object: Self::Object, visible: bool);

    /// World transform of `object`, `None` if the object no longer exists.
    fn transform(&self, object: Self::Object) -> Option<Transform>;

    fn set_transform(&mut self, object: Self::Object, transform: Transform);
}
