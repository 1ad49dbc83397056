//! Scene objects in pixel space
//!
//! The scene holds what is drawn on the editing canvas. Objects are kept in
//! paint order, bottom first. They carry no model ids; the editor's
//! [`AdapterMap`](crate::AdapterMap) links each handle back to its element.

use card_model::{ElementKind, ElementStyles, PixelRect};
use serde::{Deserialize, Serialize};

/// Opaque handle to a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectHandle(u64);

impl ObjectHandle {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Loading state of an image object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageState {
    /// Nothing to show; drawn as a placeholder
    Empty,
    /// Decode requested, placeholder shown meanwhile
    Loading { source: String },
    /// Decoded; drawn inside the unchanged footprint
    Ready {
        source: String,
        natural_width: u32,
        natural_height: u32,
    },
    /// Decode failed; the placeholder stays
    Failed { source: String, reason: String },
}

impl ImageState {
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Loading { source } | Self::Ready { source, .. } | Self::Failed { source, .. } => {
                Some(source)
            }
        }
    }

    /// Whether the object is currently drawn as a placeholder
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Self::Ready { .. })
    }
}

/// What a scene object draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneContent {
    /// Resolved preview text
    Text { text: String },
    Shape,
    Image { image: ImageState },
    /// Resolved value to encode
    Qr { value: String },
    /// Icon name
    Icon { name: String },
}

impl SceneContent {
    /// Empty content for a freshly created object of `kind`
    pub fn empty(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Self::Text {
                text: String::new(),
            },
            ElementKind::Shape => Self::Shape,
            ElementKind::Image => Self::Image {
                image: ImageState::Empty,
            },
            ElementKind::Qr => Self::Qr {
                value: String::new(),
            },
            ElementKind::Icon => Self::Icon {
                name: String::new(),
            },
        }
    }
}

/// One drawable object on the editing canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub handle: ObjectHandle,
    pub kind: ElementKind,
    /// Unrotated footprint in canvas pixels
    pub rect: PixelRect,
    /// Degrees, as entered
    pub rotation: f64,
    pub locked: bool,
    pub styles: ElementStyles,
    pub content: SceneContent,
}

impl SceneObject {
    pub fn image_state(&self) -> Option<&ImageState> {
        match &self.content {
            SceneContent::Image { image } => Some(image),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            SceneContent::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Objects in paint order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    next_handle: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a handle that is never reused within this scene
    pub fn allocate_handle(&mut self) -> ObjectHandle {
        self.next_handle += 1;
        ObjectHandle(self.next_handle)
    }

    /// Objects bottom to top
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Handles bottom to top
    pub fn paint_order(&self) -> Vec<ObjectHandle> {
        self.objects.iter().map(|o| o.handle).collect()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.handle == handle)
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.handle == handle)
    }

    pub fn index_of(&self, handle: ObjectHandle) -> Option<usize> {
        self.objects.iter().position(|o| o.handle == handle)
    }

    /// Place an object above everything else
    pub fn push_top(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> Option<SceneObject> {
        let index = self.index_of(handle)?;
        Some(self.objects.remove(index))
    }

    /// Swap with the object directly above. Returns false at the top.
    pub fn bring_forward(&mut self, handle: ObjectHandle) -> bool {
        match self.index_of(handle) {
            Some(index) if index + 1 < self.objects.len() => {
                self.objects.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap with the object directly below. Returns false at the bottom.
    pub fn send_backward(&mut self, handle: ObjectHandle) -> bool {
        match self.index_of(handle) {
            Some(index) if index > 0 => {
                self.objects.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    /// Topmost object whose footprint contains the point (rotation ignored)
    pub fn topmost_at(&self, x: f64, y: f64) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.rect.contains(x, y))
            .map(|o| o.handle)
    }

    /// Drop every object. Handles keep counting up.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn object(scene: &mut Scene, left: f64) -> ObjectHandle {
        let handle = scene.allocate_handle();
        scene.push_top(SceneObject {
            handle,
            kind: ElementKind::Shape,
            rect: PixelRect::new(left, 0.0, 100.0, 100.0),
            rotation: 0.0,
            locked: false,
            styles: ElementStyles::default(),
            content: SceneContent::Shape,
        });
        handle
    }

    #[test]
    fn test_reorder_boundaries() {
        let mut scene = Scene::new();
        let a = object(&mut scene, 0.0);
        let b = object(&mut scene, 0.0);

        assert!(!scene.bring_forward(b));
        assert!(!scene.send_backward(a));
        assert!(scene.bring_forward(a));
        assert_eq!(scene.paint_order(), vec![b, a]);
    }

    #[test]
    fn test_topmost_at() {
        let mut scene = Scene::new();
        let bottom = object(&mut scene, 0.0);
        let top = object(&mut scene, 50.0);

        assert_eq!(scene.topmost_at(75.0, 10.0), Some(top));
        assert_eq!(scene.topmost_at(10.0, 10.0), Some(bottom));
        assert_eq!(scene.topmost_at(500.0, 10.0), None);
    }

    #[test]
    fn test_handles_are_not_reused() {
        let mut scene = Scene::new();
        let first = object(&mut scene, 0.0);
        scene.clear();
        let second = object(&mut scene, 0.0);
        assert_ne!(first, second);
    }

    proptest! {
        #[test]
        fn prop_forward_then_backward_restores_order(count in 1usize..8, pick in 0usize..8) {
            let mut scene = Scene::new();
            let handles: Vec<_> = (0..count).map(|i| object(&mut scene, i as f64)).collect();
            let handle = handles[pick % count];

            if scene.bring_forward(handle) {
                prop_assert!(scene.send_backward(handle));
            }
            prop_assert_eq!(scene.paint_order(), handles);
        }
    }
}
