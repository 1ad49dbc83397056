//! The editing surface
//!
//! One surface edits one side of one template at a time. The canonical model
//! stays in the template store; the surface works on a scene built from it
//! and writes back only on [`EditingSurface::commit`].

use crate::{
    AdapterMap, EditError, EditorConfig, ElementSource, ImageLoadRequest, ImageLoadResult,
    ImageState, LoadOutcome, LoadTicket, ObjectHandle, PropertyPanel, Result, Scene, SceneContent,
    SceneObject, StoredPlacement,
};
use card_model::{
    to_percent_clamped, to_pixels, CardElement, CardSide, DataContext, ElementId, ElementKind,
    ElementStyles, Face, Geometry, PixelRect, Surface, TemplateId,
};
use data_binding::{resolve, resolve_element, resolve_media};
use std::collections::HashMap;
use store::TemplateStore;

/// Whether the scene has changes the store has not seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Clean,
    Dirty,
}

/// The template side a surface is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub template_id: TemplateId,
    pub face: Face,
}

/// Interactive editor for one card side
#[derive(Debug)]
pub struct EditingSurface {
    config: EditorConfig,
    scene: Scene,
    adapter: AdapterMap,
    selection: Option<ObjectHandle>,
    state: SessionState,
    session: Option<EditSession>,
    context: DataContext,
    /// Outstanding decodes by ticket
    pending: HashMap<LoadTicket, ObjectHandle>,
    /// Decodes not yet handed to the host
    queued: Vec<ImageLoadRequest>,
    next_ticket: u64,
    /// Element count of the side last loaded
    stored_len: usize,
}

impl EditingSurface {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            adapter: AdapterMap::new(),
            selection: None,
            state: SessionState::Clean,
            session: None,
            context: DataContext::default(),
            pending: HashMap::new(),
            queued: Vec::new(),
            next_ticket: 0,
            stored_len: 0,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == SessionState::Dirty
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Multiplier from stored font sizes, corner radii and letter spacing to
    /// canvas pixels. Hosts draw with it to match the static renderer.
    pub fn font_scale(&self) -> f64 {
        Surface::new(self.config.canvas_width, self.config.canvas_height).font_scale()
    }

    /// Scene objects bottom to top
    pub fn objects(&self) -> &[SceneObject] {
        self.scene.objects()
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.scene.get(handle)
    }

    pub fn element_id(&self, handle: ObjectHandle) -> Option<&ElementId> {
        self.adapter.get(handle).map(|s| &s.element_id)
    }

    pub fn handle_for(&self, element_id: &ElementId) -> Option<ObjectHandle> {
        self.adapter.handle_for(element_id)
    }

    /// Load a template side from the store and remember it for commit/reset.
    ///
    /// An unknown template id loads the store's default template instead.
    pub fn open(
        &mut self,
        store: &TemplateStore,
        template_id: &TemplateId,
        face: Face,
        ctx: &DataContext,
    ) -> Result<()> {
        let template = store.template_or_default(template_id);
        self.session = Some(EditSession {
            template_id: template.id.clone(),
            face,
        });
        self.load(template.side(face), ctx);
        Ok(())
    }

    /// Discard the scene and rebuild it from `side`
    pub fn load(&mut self, side: &CardSide, ctx: &DataContext) {
        self.scene.clear();
        self.adapter.clear();
        self.selection = None;
        self.pending.clear();
        self.queued.clear();
        self.context = ctx.clone();

        let mut ordered: Vec<(usize, &CardElement)> = side.elements.iter().enumerate().collect();
        ordered.sort_by_key(|(slot, element)| (element.z_index, *slot));
        for (slot, element) in ordered {
            self.place(slot, element);
        }
        self.stored_len = side.elements.len();

        self.state = SessionState::Clean;
        tracing::debug!("Loaded {} objects into the editing surface", self.scene.len());
    }

    fn place(&mut self, slot: usize, element: &CardElement) -> ObjectHandle {
        let handle = self.scene.allocate_handle();
        let rect = to_pixels(
            &element.geometry,
            self.config.canvas_width,
            self.config.canvas_height,
        );

        let content = match element.kind {
            ElementKind::Text => SceneContent::Text {
                text: resolve_element(element, &self.context),
            },
            ElementKind::Shape => SceneContent::Shape,
            ElementKind::Image => SceneContent::Image {
                image: self.request_image(handle, resolve_media(element, &self.context)),
            },
            ElementKind::Qr => SceneContent::Qr {
                value: resolve_element(element, &self.context),
            },
            ElementKind::Icon => SceneContent::Icon {
                name: resolve_element(element, &self.context),
            },
        };

        tracing::trace!("Placing {} {} at {:?}", element.kind, element.id, rect);
        self.scene.push_top(SceneObject {
            handle,
            kind: element.kind,
            rect,
            rotation: element.rotation,
            locked: element.locked,
            styles: element.styles.clone(),
            content,
        });
        self.adapter.insert(
            handle,
            ElementSource::new(element.id.clone())
                .with_binding(element.data_binding.clone())
                .with_content(element.content.clone())
                .with_stored(StoredPlacement {
                    slot,
                    z_index: element.z_index,
                    geometry: element.geometry,
                    rect,
                    styles: element.styles.clone(),
                }),
        );
        handle
    }

    /// Queue a decode for `handle`, cancelling any earlier one
    fn request_image(&mut self, handle: ObjectHandle, source: Option<String>) -> ImageState {
        self.cancel_loads(handle);

        let Some(source) = source else {
            return ImageState::Empty;
        };

        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        self.pending.insert(ticket, handle);
        self.queued.push(ImageLoadRequest {
            ticket,
            source: source.clone(),
        });
        ImageState::Loading { source }
    }

    fn cancel_loads(&mut self, handle: ObjectHandle) {
        self.pending.retain(|_, h| *h != handle);
        let pending = &self.pending;
        self.queued.retain(|r| pending.contains_key(&r.ticket));
    }

    fn default_geometry(&self) -> PixelRect {
        to_pixels(
            &Geometry::centered(self.config.default_width, self.config.default_height),
            self.config.canvas_width,
            self.config.canvas_height,
        )
    }

    fn add_object(
        &mut self,
        kind: ElementKind,
        styles: ElementStyles,
        source: ElementSource,
        content: impl FnOnce(&mut Self, ObjectHandle) -> SceneContent,
    ) -> ObjectHandle {
        let handle = self.scene.allocate_handle();
        let content = content(self, handle);
        let rect = self.default_geometry();

        self.scene.push_top(SceneObject {
            handle,
            kind,
            rect,
            rotation: 0.0,
            locked: false,
            styles,
            content,
        });
        self.adapter.insert(handle, source);
        self.selection = Some(handle);
        self.state = SessionState::Dirty;
        handle
    }

    /// Add a text element with the default text, centered and on top
    pub fn add_text(&mut self) -> ObjectHandle {
        let text = self.config.default_text.clone();
        let styles = self.config.default_text_styles.clone();
        let source = ElementSource::new(ElementId::generate()).with_content(Some(text.clone()));
        self.add_object(
            ElementKind::Text,
            styles,
            source,
            |_, _| SceneContent::Text { text },
        )
    }

    /// Add a shape, centered and on top
    pub fn add_shape(&mut self) -> ObjectHandle {
        let styles = self.config.default_shape_styles.clone();
        self.add_object(
            ElementKind::Shape,
            styles,
            ElementSource::new(ElementId::generate()),
            |_, _| SceneContent::Shape,
        )
    }

    /// Add an image. It shows as a placeholder until its decode finishes.
    pub fn add_image(&mut self, url: impl Into<String>) -> ObjectHandle {
        let url = url.into();
        let source = ElementSource::new(ElementId::generate()).with_content(Some(url.clone()));
        let url = Some(url).filter(|u| !u.trim().is_empty());
        self.add_object(
            ElementKind::Image,
            ElementStyles::default(),
            source,
            |surface, handle| SceneContent::Image {
                image: surface.request_image(handle, url),
            },
        )
    }

    /// Remove an object. The model loses it on the next commit.
    pub fn delete(&mut self, handle: ObjectHandle) -> Result<()> {
        self.scene
            .remove(handle)
            .ok_or(EditError::UnknownHandle(handle))?;
        self.adapter.remove(handle);
        self.cancel_loads(handle);
        if self.selection == Some(handle) {
            self.selection = None;
        }
        self.state = SessionState::Dirty;
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<ObjectHandle> {
        let handle = self.selection.ok_or(EditError::NoSelection)?;
        self.delete(handle)?;
        Ok(handle)
    }

    /// Swap with the object above. Returns false (and changes nothing) at the top.
    pub fn reorder_forward(&mut self, handle: ObjectHandle) -> Result<bool> {
        self.ensure_exists(handle)?;
        let moved = self.scene.bring_forward(handle);
        if moved {
            self.state = SessionState::Dirty;
        }
        Ok(moved)
    }

    /// Swap with the object below. Returns false (and changes nothing) at the bottom.
    pub fn reorder_backward(&mut self, handle: ObjectHandle) -> Result<bool> {
        self.ensure_exists(handle)?;
        let moved = self.scene.send_backward(handle);
        if moved {
            self.state = SessionState::Dirty;
        }
        Ok(moved)
    }

    /// Apply the fields set in `patch` to the live object
    pub fn update_style(&mut self, handle: ObjectHandle, patch: &ElementStyles) -> Result<()> {
        let object = self.object_mut(handle)?;
        object.styles = object.styles.merge(patch);
        self.state = SessionState::Dirty;
        Ok(())
    }

    /// Move the object's top-left corner to canvas pixel coordinates
    pub fn move_to(&mut self, handle: ObjectHandle, left: f64, top: f64) -> Result<()> {
        let object = self.object_mut(handle)?;
        object.rect.left = left;
        object.rect.top = top;
        self.state = SessionState::Dirty;
        Ok(())
    }

    /// Resize in canvas pixels. Degenerate sizes are accepted here and
    /// clamped to the minimum footprint on commit.
    pub fn resize(&mut self, handle: ObjectHandle, width: f64, height: f64) -> Result<()> {
        let object = self.object_mut(handle)?;
        object.rect.width = width;
        object.rect.height = height;
        self.state = SessionState::Dirty;
        Ok(())
    }

    pub fn rotate(&mut self, handle: ObjectHandle, degrees: f64) -> Result<()> {
        let object = self.object_mut(handle)?;
        object.rotation = degrees;
        self.state = SessionState::Dirty;
        Ok(())
    }

    /// Replace a text object's text. Typed text becomes literal content,
    /// so a bound text element is unbound.
    pub fn set_text(&mut self, handle: ObjectHandle, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let object = self.object_mut(handle)?;
        match &mut object.content {
            SceneContent::Text { text: current } => *current = text.clone(),
            _ => {
                return Err(EditError::KindMismatch {
                    handle,
                    kind: object.kind,
                })
            }
        }

        if let Some(source) = self.adapter.get_mut(handle) {
            source.data_binding = None;
            source.content = Some(text);
        }
        self.state = SessionState::Dirty;
        Ok(())
    }

    /// Bind an object to a profile field, or unbind it with `None`, and
    /// refresh its preview
    pub fn set_binding(&mut self, handle: ObjectHandle, binding: Option<&str>) -> Result<()> {
        let source = self
            .adapter
            .get_mut(handle)
            .ok_or(EditError::UnknownHandle(handle))?;
        source.data_binding = binding.map(str::to_string);
        let resolved = resolve(
            source.data_binding.as_deref(),
            source.content.as_deref(),
            &self.context,
        );

        let kind = self.object_mut(handle)?.kind;
        let content = match kind {
            ElementKind::Text => SceneContent::Text { text: resolved },
            ElementKind::Shape => SceneContent::Shape,
            ElementKind::Image => {
                let media = Some(resolved.trim().to_string()).filter(|s| !s.is_empty());
                SceneContent::Image {
                    image: self.request_image(handle, media),
                }
            }
            ElementKind::Qr => SceneContent::Qr { value: resolved },
            ElementKind::Icon => SceneContent::Icon { name: resolved },
        };

        self.object_mut(handle)?.content = content;
        self.state = SessionState::Dirty;
        Ok(())
    }

    /// Copy the selected object under a fresh id, slightly offset and on top.
    /// The copy becomes the selection.
    pub fn duplicate_selected(&mut self) -> Result<ObjectHandle> {
        let original = self.selection.ok_or(EditError::NoSelection)?;
        let mut copy = self
            .scene
            .get(original)
            .cloned()
            .ok_or(EditError::UnknownHandle(original))?;
        let source = self
            .adapter
            .get(original)
            .cloned()
            .ok_or(EditError::UnknownHandle(original))?;

        let handle = self.scene.allocate_handle();
        copy.handle = handle;
        copy.rect.left += self.config.duplicate_offset_px;
        copy.rect.top += self.config.duplicate_offset_px;
        if let SceneContent::Image { image } = &copy.content {
            let url = image.source().map(str::to_string);
            copy.content = SceneContent::Image {
                image: self.request_image(handle, url),
            };
        }

        self.scene.push_top(copy);
        self.adapter.insert(
            handle,
            ElementSource {
                element_id: ElementId::generate(),
                stored: None,
                ..source
            },
        );
        self.selection = Some(handle);
        self.state = SessionState::Dirty;
        Ok(handle)
    }

    pub fn select(&mut self, handle: ObjectHandle) -> Result<()> {
        self.ensure_exists(handle)?;
        self.selection = Some(handle);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected(&self) -> Option<ObjectHandle> {
        self.selection
    }

    /// Topmost object under a canvas point
    pub fn object_at(&self, x: f64, y: f64) -> Option<ObjectHandle> {
        self.scene.topmost_at(x, y)
    }

    /// Properties panel contents for an object
    pub fn properties(&self, handle: ObjectHandle) -> Result<PropertyPanel> {
        self.scene
            .get(handle)
            .map(PropertyPanel::for_object)
            .ok_or(EditError::UnknownHandle(handle))
    }

    /// Hand queued decode requests to the host
    pub fn take_load_requests(&mut self) -> Vec<ImageLoadRequest> {
        std::mem::take(&mut self.queued)
    }

    /// Apply a finished decode to the object that asked for it.
    ///
    /// The object's footprint never changes. Completion does not dirty the
    /// session.
    pub fn finish_image_load(&mut self, result: ImageLoadResult) -> LoadOutcome {
        let Some(handle) = self.pending.remove(&result.ticket) else {
            tracing::debug!("Discarding image load for {}", result.source);
            return LoadOutcome::Discarded;
        };
        let Some(object) = self.scene.get_mut(handle) else {
            return LoadOutcome::Discarded;
        };

        let (state, outcome) = match result.outcome {
            Ok(decoded) => (
                ImageState::Ready {
                    source: result.source,
                    natural_width: decoded.width,
                    natural_height: decoded.height,
                },
                LoadOutcome::Applied(handle),
            ),
            Err(e) => {
                tracing::warn!("Failed to load image {}: {}", result.source, e);
                (
                    ImageState::Failed {
                        source: result.source,
                        reason: e.to_string(),
                    },
                    LoadOutcome::Failed(handle),
                )
            }
        };

        object.content = SceneContent::Image { image: state };
        outcome
    }

    /// Rebuild the side's elements from the scene.
    ///
    /// Loaded elements keep their array slot, and new ones are appended in
    /// paint order. A stored `zIndex` is kept while it still paints above the
    /// object below; otherwise it is raised just past it. Geometry and styles
    /// are written back as stored unless the object changed them.
    pub fn to_elements(&self) -> Result<Vec<CardElement>> {
        let (width, height) = (self.config.canvas_width, self.config.canvas_height);
        let mut placed: Vec<(usize, CardElement)> = Vec::with_capacity(self.scene.len());
        let mut below: Option<(i32, usize)> = None;
        let mut next_slot = self.stored_len;

        for object in self.scene.objects() {
            let source = self
                .adapter
                .get(object.handle)
                .ok_or(EditError::UnknownHandle(object.handle))?;
            let stored = source.stored.as_ref();

            let (z_index, slot) = match stored {
                Some(stored) => (stored.z_index, stored.slot),
                None => {
                    next_slot += 1;
                    (below.map_or(0, |(z, _)| z), next_slot - 1)
                }
            };
            // Paint order is (zIndex, slot)
            let z_index = match below {
                Some((below_z, below_slot)) if (z_index, slot) <= (below_z, below_slot) => {
                    below_z.saturating_add(1)
                }
                _ => z_index,
            };
            below = Some((z_index, slot));

            let geometry = match stored {
                Some(stored) if stored.rect == object.rect => stored.geometry,
                _ => to_percent_clamped(&object.rect, width, height, self.config.min_footprint_px),
            };
            let styles = match stored {
                Some(stored) if stored.styles == object.styles => stored.styles.clone(),
                _ => object.styles.retain_for(object.kind),
            };

            placed.push((
                slot,
                CardElement {
                    id: source.element_id.clone(),
                    kind: object.kind,
                    geometry,
                    rotation: object.rotation,
                    locked: object.locked,
                    z_index,
                    data_binding: source.data_binding.clone(),
                    content: source.content.clone(),
                    styles,
                },
            ));
        }

        placed.sort_by_key(|(slot, _)| *slot);
        Ok(placed.into_iter().map(|(_, element)| element).collect())
    }

    /// Write the scene back to the store as the side's entire element array
    pub fn commit(&mut self, store: &TemplateStore) -> Result<()> {
        let session = self.session.clone().ok_or(EditError::NoSession)?;
        let elements = self.to_elements()?;
        let count = elements.len();

        store.replace_side_elements(&session.template_id, session.face, elements)?;
        self.state = SessionState::Clean;
        tracing::debug!(
            "Committed {} objects to {} ({})",
            count,
            session.template_id,
            session.face
        );
        Ok(())
    }

    /// Throw away uncommitted changes and reload from the store
    pub fn reset(&mut self, store: &TemplateStore) -> Result<()> {
        let session = self.session.clone().ok_or(EditError::NoSession)?;
        let ctx = self.context.clone();
        self.open(store, &session.template_id, session.face, &ctx)
    }

    fn ensure_exists(&self, handle: ObjectHandle) -> Result<()> {
        self.scene
            .get(handle)
            .map(|_| ())
            .ok_or(EditError::UnknownHandle(handle))
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> Result<&mut SceneObject> {
        self.scene
            .get_mut(handle)
            .ok_or(EditError::UnknownHandle(handle))
    }
}

impl Default for EditingSurface {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_request, DataUriDecoder, DecodedImage, ImageFormat, ResourceError};
    use card_model::builtin::{builtin_templates, DEFAULT_TEMPLATE_ID};

    fn classic() -> TemplateId {
        TemplateId::new(DEFAULT_TEMPLATE_ID)
    }

    fn jane() -> DataContext {
        DataContext::new()
            .with_full_name("Jane Doe")
            .with_role("Engineer")
    }

    fn opened(store: &TemplateStore, face: Face) -> EditingSurface {
        let mut surface = EditingSurface::default();
        surface.open(store, &classic(), face, &jane()).unwrap();
        surface
    }

    fn front_ids(store: &TemplateStore) -> Vec<ElementId> {
        store
            .get_template(&classic())
            .unwrap()
            .front
            .elements
            .iter()
            .map(|e| e.id.clone())
            .collect()
    }

    /// Element ids of a stored side, bottom to top
    fn stored_paint_order(side: &CardSide) -> Vec<ElementId> {
        side.paint_order().into_iter().map(|e| e.id.clone()).collect()
    }

    fn scene_ids(surface: &EditingSurface) -> Vec<ElementId> {
        surface
            .objects()
            .iter()
            .map(|o| surface.element_id(o.handle).unwrap().clone())
            .collect()
    }

    #[test]
    fn test_open_places_elements_in_paint_order() {
        let store = TemplateStore::in_memory();
        let surface = opened(&store, Face::Front);
        let side = store.get_template(&classic()).unwrap().front;

        let expected: Vec<&ElementId> = side.paint_order().into_iter().map(|e| &e.id).collect();
        let actual: Vec<&ElementId> = surface
            .objects()
            .iter()
            .map(|o| surface.element_id(o.handle).unwrap())
            .collect();
        assert_eq!(actual, expected);
        assert_eq!(surface.state(), SessionState::Clean);
    }

    #[test]
    fn test_portrait_placed_in_pixels() {
        let store = TemplateStore::in_memory();
        let surface = opened(&store, Face::Front);

        let handle = surface.handle_for(&ElementId::new("portrait")).unwrap();
        let portrait = surface.object(handle).unwrap();
        assert_eq!(portrait.rect, PixelRect::new(200.0, 0.0, 200.0, 510.0));
        // No profile image: nothing to load
        assert_eq!(portrait.image_state(), Some(&ImageState::Empty));
    }

    #[test]
    fn test_text_shows_resolved_value() {
        let store = TemplateStore::in_memory();
        let surface = opened(&store, Face::Front);

        let texts: Vec<&str> = surface.objects().iter().filter_map(|o| o.text()).collect();
        assert!(texts.contains(&"Jane Doe"));
        assert!(texts.contains(&"Engineer"));
    }

    #[test]
    fn test_unknown_template_falls_back_to_default() {
        let store = TemplateStore::in_memory();
        let mut surface = EditingSurface::default();
        surface
            .open(&store, &TemplateId::new("missing"), Face::Front, &jane())
            .unwrap();

        assert_eq!(surface.session().unwrap().template_id, classic());
        assert!(!surface.objects().is_empty());
    }

    #[test]
    fn test_add_then_delete_before_commit_leaves_model_unchanged() {
        let store = TemplateStore::in_memory();
        let before = store.get_template(&classic()).unwrap().front;
        let mut surface = opened(&store, Face::Front);

        let shape = surface.add_shape();
        assert_eq!(surface.selected(), Some(shape));
        assert!(surface.is_dirty());
        surface.delete_selected().unwrap();
        surface.commit(&store).unwrap();

        let after = store.get_template(&classic()).unwrap().front;
        assert_eq!(after, before);
        assert_eq!(
            serde_json::to_string(&after).unwrap(),
            serde_json::to_string(&before).unwrap()
        );
        assert_eq!(surface.state(), SessionState::Clean);
    }

    #[test]
    fn test_untouched_commit_keeps_every_builtin_side() {
        let store = TemplateStore::in_memory();

        for template in builtin_templates() {
            for face in [Face::Front, Face::Back] {
                let before = template.side(face).clone();
                let mut surface = EditingSurface::default();
                surface.open(&store, &template.id, face, &jane()).unwrap();
                surface.commit(&store).unwrap();

                let after = store.get_template(&template.id).unwrap().side(face).clone();
                assert_eq!(
                    serde_json::to_string(&after).unwrap(),
                    serde_json::to_string(&before).unwrap(),
                    "{} {}",
                    template.id,
                    face
                );
            }
        }
    }

    #[test]
    fn test_untouched_commit_on_other_canvas_keeps_geometry() {
        let store = TemplateStore::in_memory();
        let before = store.get_template(&classic()).unwrap().back;
        let mut surface = EditingSurface::new(EditorConfig::default().with_canvas(333.0, 517.0));
        surface.open(&store, &classic(), Face::Back, &jane()).unwrap();
        surface.commit(&store).unwrap();

        assert_eq!(store.get_template(&classic()).unwrap().back, before);
    }

    #[test]
    fn test_deleted_element_is_gone_after_commit() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);
        let name = ElementId::new("name");

        let handle = surface.handle_for(&name).unwrap();
        surface.delete(handle).unwrap();
        surface.commit(&store).unwrap();

        assert!(surface.handle_for(&name).is_none());
        assert!(!front_ids(&store).contains(&name));
    }

    #[test]
    fn test_new_element_is_topmost_after_commit() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);

        let handle = surface.add_text();
        let id = surface.element_id(handle).unwrap().clone();
        surface.commit(&store).unwrap();

        let front = store.get_template(&classic()).unwrap().front;
        let added = front.element(&id).unwrap();
        assert_eq!(added.z_index, front.elements.iter().map(|e| e.z_index).max().unwrap());
        assert_eq!(added.content.as_deref(), Some("Your text"));
        assert_eq!(added.geometry, Geometry::centered(40.0, 10.0));
    }

    #[test]
    fn test_reorder_forward_then_backward_is_identity() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);
        assert!(surface.objects().len() >= 3);

        let before: Vec<ObjectHandle> = surface.objects().iter().map(|o| o.handle).collect();
        let middle = before[1];
        assert!(surface.reorder_forward(middle).unwrap());
        assert!(surface.reorder_backward(middle).unwrap());

        let after: Vec<ObjectHandle> = surface.objects().iter().map(|o| o.handle).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reorder_at_boundary_is_noop() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);
        let top = surface.objects().last().unwrap().handle;
        let bottom = surface.objects()[0].handle;

        assert!(!surface.reorder_forward(top).unwrap());
        assert!(!surface.reorder_backward(bottom).unwrap());
        assert_eq!(surface.state(), SessionState::Clean);
    }

    #[test]
    fn test_reorder_raises_only_the_moved_element() {
        let store = TemplateStore::in_memory();
        let before = store.get_template(&classic()).unwrap().front;
        let mut surface = opened(&store, Face::Front);
        let portrait = ElementId::new("portrait");
        let handle = surface.handle_for(&portrait).unwrap();
        assert_eq!(surface.objects()[0].handle, handle);

        surface.reorder_forward(handle).unwrap();
        surface.commit(&store).unwrap();

        let after = store.get_template(&classic()).unwrap().front;
        assert_eq!(stored_paint_order(&after), scene_ids(&surface));
        for (old, new) in before.elements.iter().zip(&after.elements) {
            assert_eq!(old.id, new.id);
            if old.id != portrait {
                assert_eq!(old, new);
            }
        }
        let footer = before.element(&ElementId::new("footer-band")).unwrap().z_index;
        assert_eq!(after.element(&portrait).unwrap().z_index, footer + 1);
    }

    #[test]
    fn test_new_element_sent_to_bottom_paints_first() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);
        let shape = surface.add_shape();
        while surface.reorder_backward(shape).unwrap() {}
        surface.commit(&store).unwrap();

        let after = store.get_template(&classic()).unwrap().front;
        assert_eq!(stored_paint_order(&after), scene_ids(&surface));
        assert_eq!(&after.elements.last().unwrap().id, surface.element_id(shape).unwrap());
    }

    #[test]
    fn test_moved_element_gets_new_geometry() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);
        let handle = surface.handle_for(&ElementId::new("portrait")).unwrap();

        surface.move_to(handle, 0.0, 0.0).unwrap();
        surface.commit(&store).unwrap();

        let front = store.get_template(&classic()).unwrap().front;
        let geometry = front.element(&ElementId::new("portrait")).unwrap().geometry;
        assert_eq!((geometry.x, geometry.y), (0.0, 0.0));
        assert_eq!(geometry.width, 50.0);
    }

    #[test]
    fn test_font_scale_follows_canvas_width() {
        assert_eq!(EditingSurface::default().font_scale(), 1.0);
        let wide = EditingSurface::new(EditorConfig::default().with_canvas(800.0, 1200.0));
        assert_eq!(wide.font_scale(), 2.0);
    }

    #[test]
    fn test_degenerate_geometry_is_clamped_on_commit() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Back);
        let handle = surface.add_shape();
        let id = surface.element_id(handle).unwrap().clone();

        surface.resize(handle, 0.0, -20.0).unwrap();
        surface.move_to(handle, -50.0, 10_000.0).unwrap();
        surface.commit(&store).unwrap();

        let back = store.get_template(&classic()).unwrap().back;
        let geometry = back.element(&id).unwrap().geometry;
        assert!(geometry.is_in_range());
        assert!(geometry.width > 0.0 && geometry.height > 0.0);
        assert_eq!(geometry.x, 0.0);
    }

    #[test]
    fn test_commit_keeps_only_relevant_styles() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Back);
        let shape = surface.add_shape();
        let id = surface.element_id(shape).unwrap().clone();

        let patch = ElementStyles::new()
            .with_font_size(30.0)
            .with_border_radius(8.0)
            .with_opacity(0.5);
        surface.update_style(shape, &patch).unwrap();
        surface.commit(&store).unwrap();

        let styles = store
            .get_template(&classic())
            .unwrap()
            .back
            .element(&id)
            .unwrap()
            .styles
            .clone();
        assert_eq!(styles.font_size, None);
        assert_eq!(styles.border_radius, Some(8.0));
        assert_eq!(styles.opacity, Some(0.5));
    }

    #[test]
    fn test_reset_discards_uncommitted_changes() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);
        let count = surface.objects().len();

        surface.add_shape();
        surface.add_text();
        surface.reset(&store).unwrap();

        assert_eq!(surface.objects().len(), count);
        assert_eq!(surface.state(), SessionState::Clean);
        assert_eq!(surface.selected(), None);
    }

    #[test]
    fn test_commit_without_session() {
        let store = TemplateStore::in_memory();
        let mut surface = EditingSurface::default();
        assert!(matches!(surface.commit(&store), Err(EditError::NoSession)));
    }

    #[test]
    fn test_set_text_unbinds() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);
        let name = ElementId::new("name");
        let handle = surface.handle_for(&name).unwrap();

        surface.set_text(handle, "Dr. Jane").unwrap();
        surface.commit(&store).unwrap();

        let front = store.get_template(&classic()).unwrap().front;
        let element = front.element(&name).unwrap();
        assert_eq!(element.data_binding, None);
        assert_eq!(element.content.as_deref(), Some("Dr. Jane"));

        let shape = surface.add_shape();
        assert!(matches!(
            surface.set_text(shape, "x"),
            Err(EditError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_set_binding_refreshes_preview() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Back);
        let handle = surface.add_text();

        surface.set_binding(handle, Some("{{role}}")).unwrap();
        assert_eq!(surface.object(handle).unwrap().text(), Some("Engineer"));

        surface.set_binding(handle, None).unwrap();
        assert_eq!(surface.object(handle).unwrap().text(), Some("Your text"));
    }

    #[test]
    fn test_duplicate_selected() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Back);
        let original = surface.add_shape();
        let copy = surface.duplicate_selected().unwrap();

        assert_ne!(surface.element_id(original), surface.element_id(copy));
        assert_eq!(surface.selected(), Some(copy));
        assert_eq!(surface.objects().last().unwrap().handle, copy);

        let a = surface.object(original).unwrap().rect;
        let b = surface.object(copy).unwrap().rect;
        assert_eq!(b.left - a.left, surface.config().duplicate_offset_px);

        surface.clear_selection();
        assert!(matches!(surface.duplicate_selected(), Err(EditError::NoSelection)));
    }

    #[test]
    fn test_object_at_and_properties() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Back);
        let shape = surface.add_shape();

        let (cx, cy) = surface.object(shape).unwrap().rect.center();
        assert_eq!(surface.object_at(cx, cy), Some(shape));

        let panel = surface.properties(shape).unwrap();
        assert!(panel.shape.is_some());
        assert!(panel.text.is_none());
        assert_eq!(panel.common.fill.as_deref(), Some("#d9e2ec"));
    }

    #[test]
    fn test_unknown_handle_does_not_abort_session() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);
        let handle = surface.add_shape();
        surface.delete(handle).unwrap();

        assert!(matches!(surface.rotate(handle, 45.0), Err(EditError::UnknownHandle(_))));
        assert!(surface.commit(&store).is_ok());
    }

    #[test]
    fn test_image_is_placeholder_until_decoded() {
        let mut surface = EditingSurface::default();
        let handle = surface.add_image("https://cdn.example/photo.png");
        let footprint = surface.object(handle).unwrap().rect;

        let requests = surface.take_load_requests();
        assert_eq!(requests.len(), 1);
        assert!(surface.object(handle).unwrap().image_state().unwrap().is_placeholder());

        let outcome = surface.finish_image_load(ImageLoadResult {
            ticket: requests[0].ticket,
            source: requests[0].source.clone(),
            outcome: Ok(DecodedImage {
                format: ImageFormat::Png,
                width: 1024,
                height: 768,
            }),
        });
        assert_eq!(outcome, LoadOutcome::Applied(handle));

        let object = surface.object(handle).unwrap();
        assert!(!object.image_state().unwrap().is_placeholder());
        assert_eq!(object.rect, footprint);
    }

    #[test]
    fn test_late_decode_for_deleted_image_is_discarded() {
        let mut surface = EditingSurface::default();
        let handle = surface.add_image("https://cdn.example/photo.png");
        let request = surface.take_load_requests().remove(0);
        surface.delete(handle).unwrap();

        let outcome = surface.finish_image_load(ImageLoadResult {
            ticket: request.ticket,
            source: request.source,
            outcome: Ok(DecodedImage {
                format: ImageFormat::Png,
                width: 1,
                height: 1,
            }),
        });
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert!(surface.objects().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_image_keeps_placeholder() {
        let store = TemplateStore::in_memory();
        let mut surface = opened(&store, Face::Front);
        let handle = surface.add_image("https://cdn.example/missing.png");
        let state = surface.state();

        let decoder = DataUriDecoder::new();
        for request in surface.take_load_requests() {
            let result = decode_request(&decoder, request).await;
            assert!(matches!(result.outcome, Err(ResourceError::Unreachable(_))));
            assert_eq!(surface.finish_image_load(result), LoadOutcome::Failed(handle));
        }

        let image = surface.object(handle).unwrap().image_state().unwrap();
        assert!(matches!(image, ImageState::Failed { .. }));
        assert_eq!(surface.state(), state);
        assert!(surface.commit(&store).is_ok());
    }

    #[tokio::test]
    async fn test_bound_profile_image_loads_from_context() {
        let store = TemplateStore::in_memory();
        let png = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
        let ctx = jane().with_profile_image(png);

        let mut surface = EditingSurface::default();
        surface.open(&store, &classic(), Face::Front, &ctx).unwrap();
        let portrait = surface.handle_for(&ElementId::new("portrait")).unwrap();

        let requests = surface.take_load_requests();
        assert_eq!(requests.len(), 1);
        let result = decode_request(&DataUriDecoder::new(), requests[0].clone()).await;
        assert_eq!(surface.finish_image_load(result), LoadOutcome::Applied(portrait));
        assert_eq!(surface.state(), SessionState::Clean);
    }
}
