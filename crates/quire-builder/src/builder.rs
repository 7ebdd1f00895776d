//! The formatting-object tree builder.
//!
//! [§ 6.1 Introduction to Formatting Objects](https://www.w3.org/TR/xsl11/)
//!
//! "The formatting object tree is constructed from the result tree by
//! interpreting each element and attribute in the fo: namespace."
//!
//! [`FoTreeBuilder`] receives markup events through [`ContentHandler`] and
//! builds one [`FoTree`]. It validates each element against its parent's
//! content model, binds the element's attributes into a [`PropertyList`]
//! chained to the parent's list, accumulates character data into text runs
//! and hands foreign sub-trees to a [`FragmentBuilder`].

use std::rc::Rc;
use std::sync::Arc;

use quire_common::{
    EventKind, EventListener, Locator, LoggingListener, Severity, ValidationEvent,
};
use quire_fotree::{FoNode, FoTree, NodeData, NodeId, NodeKind, apply_text_transform};
use quire_properties::{
    AreaTraits, BindIssueKind, Property, PropertyError, PropertyId, PropertyList,
    PropertyRegistry,
};
use strum_macros::Display;

use crate::cancel::CancellationToken;
use crate::config::BuilderConfig;
use crate::content_model::{self, Violation};
use crate::elements::ElementRegistry;
use crate::error::BuildError;
use crate::fragment::FragmentBuilder;
use crate::handler::{Attribute, ContentHandler};
use crate::output::{FoDocument, FoEventHandler, FontRegistry, IdRegistry};
use crate::text::{TextBuffer, is_xml_whitespace, split_chunks};
use crate::whitespace::WhitespaceHandler;

/// Where a builder is in its single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BuilderState {
    /// `start_document` has not been called.
    Idle,
    /// The document started; `fo:root` has not been seen yet.
    AwaitingRoot,
    /// Building the tree.
    Building,
    /// Building inside one or more `fo:marker`s. Property lists created here
    /// never become current.
    InMarker,
    /// A foreign sub-tree is being captured.
    Delegated,
    /// `end_document` returned the finished document.
    Finished,
    /// A fatal error occurred; every later event is rejected.
    Failed,
}

/// One entry of the stack of open elements.
#[derive(Debug)]
struct OpenElement {
    node: NodeId,
    namespace: String,
    local_name: String,
}

/// The foreign node whose sub-tree is being captured.
#[derive(Debug)]
struct Delegate {
    node: NodeId,
    fragment: FragmentBuilder,
}

/// Builds the formatting-object tree of one document from markup events.
///
/// # Example
/// ```
/// use quire_builder::{Attribute, BuilderConfig, ContentHandler, FoTreeBuilder, NullHandler};
/// use quire_fotree::{FO_NAMESPACE, NodeKind};
///
/// let mut builder = FoTreeBuilder::from_config(BuilderConfig::default(), NullHandler);
/// builder.start_document().unwrap();
/// builder.start_element(FO_NAMESPACE, "root", &[Attribute::new("font-size", "10pt")]).unwrap();
/// builder.end_element(FO_NAMESPACE, "root").unwrap();
/// let document = builder.end_document().unwrap();
///
/// let root = document.root().unwrap();
/// assert_eq!(document.tree.kind(root), Some(NodeKind::Root));
/// ```
pub struct FoTreeBuilder<H: FoEventHandler> {
    config: BuilderConfig,
    properties: Arc<PropertyRegistry>,
    elements: Arc<ElementRegistry>,
    handler: H,
    listener: Box<dyn EventListener>,

    /// Idle, AwaitingRoot, Building, Finished or Failed. The marker and
    /// delegation states are derived from the fields below.
    phase: BuilderState,
    tree: FoTree,

    /// The current node is the last entry; the document node when empty.
    open_elements: Vec<OpenElement>,
    /// Property lists that are current for new children, paired with the
    /// node that owns each.
    list_stack: Vec<(NodeId, Rc<PropertyList>)>,
    marker_depth: usize,
    /// Depth inside an element that is being ignored with its sub-tree.
    skip_depth: usize,
    delegate: Option<Delegate>,

    pending: TextBuffer,
    whitespace: WhitespaceHandler,
    ids: IdRegistry,
    fonts: FontRegistry,
    events: Vec<ValidationEvent>,
    locator: Option<Locator>,
    cancel: CancellationToken,
}

impl<H: FoEventHandler> FoTreeBuilder<H> {
    /// A builder using the given registries.
    #[must_use]
    pub fn new(
        config: BuilderConfig,
        properties: Arc<PropertyRegistry>,
        elements: Arc<ElementRegistry>,
        handler: H,
    ) -> Self {
        Self {
            config,
            properties,
            elements,
            handler,
            listener: Box::new(LoggingListener),
            phase: BuilderState::Idle,
            tree: FoTree::new(),
            open_elements: Vec::new(),
            list_stack: Vec::new(),
            marker_depth: 0,
            skip_depth: 0,
            delegate: None,
            pending: TextBuffer::new(),
            whitespace: WhitespaceHandler::new(),
            ids: IdRegistry::new(),
            fonts: FontRegistry::new(),
            events: Vec::new(),
            locator: None,
            cancel: CancellationToken::new(),
        }
    }

    /// A builder using the shared element registry and a property registry
    /// matching `config`.
    #[must_use]
    pub fn from_config(config: BuilderConfig, handler: H) -> Self {
        let properties = config.property_registry();
        Self::new(config, properties, ElementRegistry::shared(), handler)
    }

    /// Send events to `listener` instead of the `log` facade. Events are
    /// still collected into the finished document.
    pub fn set_listener(&mut self, listener: Box<dyn EventListener>) {
        self.listener = listener;
    }

    /// Share a cancellation token with the event producer.
    #[must_use]
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The token set when this builder fails.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The downstream handler.
    #[must_use]
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// Consume the builder and return its downstream handler.
    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// The tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &FoTree {
        &self.tree
    }

    /// Events reported so far.
    #[must_use]
    pub fn events(&self) -> &[ValidationEvent] {
        &self.events
    }

    /// The current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> BuilderState {
        match self.phase {
            BuilderState::Building if self.delegate.is_some() => BuilderState::Delegated,
            BuilderState::Building if self.marker_depth > 0 => BuilderState::InMarker,
            phase => phase,
        }
    }

    /// The node new children are appended to.
    fn current_node(&self) -> NodeId {
        self.open_elements
            .last()
            .map_or(NodeId::ROOT, |open| open.node)
    }

    fn name_of(&self, node: NodeId) -> String {
        self.tree
            .get(node)
            .map_or_else(String::new, FoNode::display_name)
    }

    /// Reject events on a builder that is not building.
    fn ensure_active(&mut self, event: &str) -> Result<(), BuildError> {
        if self.phase == BuilderState::Failed {
            return Err(BuildError::Cancelled);
        }
        if self.cancel.is_cancelled() {
            self.phase = BuilderState::Failed;
            return Err(BuildError::Cancelled);
        }
        match self.phase {
            BuilderState::Idle => Err(self.fail(BuildError::EventStream(format!(
                "{event} before start_document"
            )))),
            BuilderState::Finished => Err(BuildError::EventStream(format!(
                "{event} after end_document"
            ))),
            _ => Ok(()),
        }
    }

    /// Record an event and pass it to the listener.
    fn report(&mut self, event: ValidationEvent) {
        self.listener.handle(&event);
        self.events.push(event);
    }

    /// Enter [`BuilderState::Failed`], signal cancellation and record the
    /// error as a fatal event. Returns the error for propagation.
    fn fail(&mut self, error: BuildError) -> BuildError {
        let event = match &error {
            BuildError::Structural(event) => ValidationEvent {
                severity: Severity::Fatal,
                ..event.clone()
            },
            BuildError::Property { node, source } => {
                let event =
                    ValidationEvent::new(Severity::Fatal, EventKind::Property, source.to_string())
                        .with_node(node.clone());
                match source.property_name() {
                    Some(property) => event.with_property(property),
                    None => event,
                }
            }
            BuildError::EventStream(_) | BuildError::Reuse | BuildError::Cancelled => {
                ValidationEvent::new(Severity::Fatal, EventKind::EventStream, error.to_string())
            }
        };
        let event = if event.locator.is_none() {
            event.with_locator(self.locator)
        } else {
            event
        };
        log::debug!(target: "quire::builder", "build failed: {error}");

        self.report(event);
        self.phase = BuilderState::Failed;
        self.cancel.cancel();
        error
    }

    /// A structural problem: fatal in strict mode, reported otherwise.
    fn structural(&mut self, node_name: &str, description: String) -> Result<(), BuildError> {
        let event = ValidationEvent::new(Severity::Error, EventKind::Structural, description)
            .with_node(node_name)
            .with_locator(self.locator);
        if self.config.validation_mode().is_strict() {
            return Err(self.fail(BuildError::Structural(event)));
        }
        self.report(event);
        Ok(())
    }

    fn violation(&mut self, node_name: &str, violation: &Violation) -> Result<(), BuildError> {
        self.structural(node_name, violation.to_string())
    }

    /// A property problem: fatal in strict mode, reported otherwise.
    fn property_error(
        &mut self,
        node_name: &str,
        kind: EventKind,
        source: PropertyError,
    ) -> Result<(), BuildError> {
        if self.config.validation_mode().is_strict() {
            return Err(self.fail(BuildError::Property {
                node: node_name.to_string(),
                source,
            }));
        }
        let event = ValidationEvent::new(Severity::Error, kind, source.to_string())
            .with_node(node_name)
            .with_locator(self.locator);
        let event = match source.property_name() {
            Some(property) => event.with_property(property),
            None => event,
        };
        self.report(event);
        Ok(())
    }

    /// [§ 5.1 Specified, Computed, and Actual Values, and Inheritance](https://www.w3.org/TR/xsl11/)
    ///
    /// Create the property list of a new formatting object, chained to the
    /// current list, and bind its attributes.
    fn make_property_list(
        &mut self,
        kind: NodeKind,
        node_name: &str,
        attributes: &[Attribute],
    ) -> Result<PropertyList, BuildError> {
        let parent = self.list_stack.last().map(|(_, list)| Rc::clone(list));
        let traits = AreaTraits {
            generates_inline_areas: kind.generates_inline_areas(),
            generates_reference_areas: kind.generates_reference_areas(),
        };
        let mut list = PropertyList::new(Arc::clone(&self.properties), parent, node_name, traits);

        let pairs: Vec<(&str, &str)> = attributes
            .iter()
            .filter(|attr| attr.namespace.is_empty())
            .map(|attr| (attr.qualified_name.as_str(), attr.value.as_str()))
            .collect();

        for issue in list.bind_attributes(&pairs) {
            match issue.kind {
                BindIssueKind::UnknownProperty => {
                    let event = ValidationEvent::new(
                        Severity::Warning,
                        EventKind::Property,
                        format!("unknown property \"{}\" ignored", issue.attribute),
                    )
                    .with_node(node_name)
                    .with_property(issue.attribute)
                    .with_locator(self.locator);
                    self.report(event);
                }
                BindIssueKind::Invalid(source) => {
                    self.property_error(node_name, EventKind::Property, source)?;
                }
            }
        }
        Ok(list)
    }

    /// [§ 7.30.8 "id"](https://www.w3.org/TR/xsl11/) and
    /// [§ 7.30.13 "ref-id"](https://www.w3.org/TR/xsl11/)
    fn register_ids(&mut self, node: NodeId, node_name: &str) -> Result<(), BuildError> {
        let Some(list) = self.tree.properties(node).cloned() else {
            return Ok(());
        };

        if let Some(reference) = list.get_explicit(PropertyId::RefId).and_then(Property::as_str) {
            self.ids.reference(reference);
        }

        // Marker content is copied wherever it is retrieved, so its ids are
        // not definitions of their own.
        if self.marker_depth > 0 {
            return Ok(());
        }
        let Some(id) = list.get_explicit(PropertyId::Id).and_then(Property::as_str) else {
            return Ok(());
        };
        if self.ids.define(id, node).is_err() {
            let source = PropertyError::InvalidValue {
                property: PropertyId::Id.to_string(),
                value: id.to_string(),
                reason: "duplicate id".to_string(),
            };
            self.property_error(node_name, EventKind::IdReference, source)?;
        }
        Ok(())
    }

    /// Turn the pending character data of `parent` into text runs.
    ///
    /// STEP 1: Take the buffer.
    /// STEP 2: Split it into chunks of at most `max_chunk_len` characters.
    /// STEP 3: Append one run per chunk, linked into the block's chain.
    /// STEP 4: Apply `text-transform` to each run in order.
    fn flush_text(&mut self, parent: NodeId) {
        if self.pending.is_empty() {
            return;
        }
        let text = self.pending.take();

        let list = self.tree.properties(parent).cloned();
        let transform = list
            .as_deref()
            .and_then(|list| {
                list.get(PropertyId::TextTransform)
                    .inspect_err(|error| {
                        log::debug!(target: "quire::builder", "text-transform not applied: {error}");
                    })
                    .ok()
            })
            .and_then(|value| value.as_enum());
        let carries_fonts = self.tree.kind(parent).is_some_and(NodeKind::carries_fonts);
        if let Some(list) = list.as_deref().filter(|_| carries_fonts) {
            let _ = self.fonts.record(list);
        }

        for chunk in split_chunks(&text, self.config.max_chunk_len()) {
            let run = self.tree.append_text(parent, chunk, self.locator);
            if let Some(transform) = transform {
                apply_text_transform(&mut self.tree, run, transform);
            }
            self.handler.characters(run, &self.tree);
        }
    }

    /// Flush the parent's text, then append `node` to it.
    fn insert(&mut self, parent: NodeId, node: FoNode) -> NodeId {
        let kind = node.kind;
        self.flush_text(parent);
        let id = self.tree.alloc(node);
        self.tree.append_child(parent, id);
        self.whitespace.child_appended(&mut self.tree, parent, kind);
        id
    }

    /// The captured foreign sub-tree is complete: store it and re-join
    /// [`BuilderState::Building`].
    fn finish_foreign(&mut self) -> Result<(), BuildError> {
        let Some(Delegate { node, mut fragment }) = self.delegate.take() else {
            return Ok(());
        };
        let element = fragment.end_document().map_err(|error| self.fail(error))?;
        if let Some(foreign) = self.tree.get_mut(node) {
            foreign.data = NodeData::Foreign(element);
        }
        self.tree.close(node);
        self.handler.end_node(NodeKind::Foreign, node, &self.tree);
        Ok(())
    }
}

impl<H: FoEventHandler> ContentHandler for FoTreeBuilder<H> {
    type Output = FoDocument;

    fn set_locator(&mut self, locator: Locator) {
        self.locator = Some(locator);
    }

    fn start_document(&mut self) -> Result<(), BuildError> {
        if self.phase != BuilderState::Idle {
            return Err(BuildError::Reuse);
        }
        self.phase = BuilderState::AwaitingRoot;
        self.handler.start_document();
        Ok(())
    }

    fn start_element(
        &mut self,
        namespace: &str,
        local_name: &str,
        attributes: &[Attribute],
    ) -> Result<(), BuildError> {
        self.ensure_active("start_element")?;

        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return Ok(());
        }
        if let Some(delegate) = self.delegate.as_mut() {
            let result = delegate
                .fragment
                .start_element(namespace, local_name, attributes);
            return result.map_err(|error| self.fail(error));
        }

        let parent = self.current_node();

        // STEP 1: Create the node through the element registry.
        let node = self
            .elements
            .create(namespace, local_name)
            .with_locator(self.locator);
        let kind = node.kind;
        let node_name = node.display_name();

        // STEP 2: Validate it as a child of the current node. Elements that
        //         cannot hang off the document node are ignored with their
        //         whole sub-tree.
        if let Err(violation) = content_model::validate_child(&self.tree, parent, kind) {
            self.violation(&node_name, &violation)?;
            if parent == NodeId::ROOT {
                self.skip_depth = 1;
                return Ok(());
            }
        }

        if kind == NodeKind::Unknown {
            let event = ValidationEvent::new(
                Severity::Warning,
                EventKind::UnknownNode,
                format!("unknown element {{{namespace}}}{local_name}"),
            )
            .with_node(node_name.clone())
            .with_locator(self.locator);
            self.report(event);
        }

        // Foreign sub-trees are captured verbatim.
        if kind == NodeKind::Foreign {
            let id = self.insert(parent, node);
            self.handler.start_node(kind, id, &self.tree);
            self.delegate = Some(Delegate {
                node: id,
                fragment: FragmentBuilder::new(namespace, local_name, attributes),
            });
            return Ok(());
        }

        // STEP 3: Create its property list and bind the attributes.
        let node = if kind.is_formatting_object() {
            let list = self.make_property_list(kind, &node_name, attributes)?;
            node.with_properties(Rc::new(list))
        } else {
            node
        };

        // STEP 4: Enter marker depth. Lists created from here on never
        //         become current.
        if kind.is_marker() {
            self.marker_depth += 1;
        }

        // STEP 5: Append it to the current node.
        let id = self.insert(parent, node);
        self.register_ids(id, &node_name)?;
        if kind == NodeKind::Root {
            self.phase = BuilderState::Building;
        }

        // STEP 6: Make its list current and make it the current node.
        let owned = self.tree.properties(id).filter(|_| self.marker_depth == 0);
        if let Some(list) = owned.cloned() {
            self.list_stack.push((id, list));
        }
        self.open_elements.push(OpenElement {
            node: id,
            namespace: namespace.to_string(),
            local_name: local_name.to_string(),
        });
        log::trace!(target: "quire::builder", "start {node_name} as {id:?}");
        self.handler.start_node(kind, id, &self.tree);
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), BuildError> {
        self.ensure_active("characters")?;

        if self.skip_depth > 0 {
            return Ok(());
        }
        if let Some(delegate) = self.delegate.as_mut() {
            let result = delegate.fragment.characters(text);
            return result.map_err(|error| self.fail(error));
        }

        let current = self.current_node();
        let kind = self.tree.kind(current).unwrap_or(NodeKind::Document);
        if current == NodeId::ROOT || !content_model::accepts_text(kind) {
            if text.chars().all(is_xml_whitespace) {
                return Ok(());
            }
            let name = self.name_of(current);
            // Dropped in lenient mode.
            return self.structural(&name, format!("text is not allowed in {name}"));
        }

        self.pending.push(text);
        Ok(())
    }

    fn end_element(&mut self, namespace: &str, local_name: &str) -> Result<(), BuildError> {
        self.ensure_active("end_element")?;

        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return Ok(());
        }
        if let Some(delegate) = self.delegate.as_mut() {
            let result = delegate.fragment.end_element(namespace, local_name);
            let complete = delegate.fragment.is_complete();
            result.map_err(|error| self.fail(error))?;
            return if complete {
                self.finish_foreign()
            } else {
                Ok(())
            };
        }

        // STEP 1: There must be a current node.
        let Some(open) = self.open_elements.last() else {
            return Err(self.fail(BuildError::EventStream(format!(
                "</{local_name}> without a matching start tag"
            ))));
        };

        // STEP 2: Its name must match.
        if open.namespace != namespace || open.local_name != local_name {
            let message = format!("</{local_name}> does not match <{}>", open.local_name);
            return Err(self.fail(BuildError::EventStream(message)));
        }
        let node = open.node;
        let kind = self.tree.kind(node).unwrap_or(NodeKind::Unknown);
        let node_name = self.name_of(node);

        // STEP 3: Final flush, terminal whitespace pass, missing children.
        self.flush_text(node);
        self.whitespace.node_ended(&mut self.tree, node);
        for violation in content_model::check_end(&self.tree, node) {
            self.violation(&node_name, &violation)?;
        }

        // STEP 4: Pop the list this node made current.
        if self.marker_depth == 0
            && self
                .list_stack
                .last()
                .is_some_and(|(owner, _)| *owner == node)
        {
            let _ = self.list_stack.pop();
        }

        // STEP 5: Leave marker depth.
        if kind.is_marker() {
            self.marker_depth = self.marker_depth.saturating_sub(1);
        }

        // STEP 6: Notify downstream and move to the parent.
        self.tree.close(node);
        self.handler.end_node(kind, node, &self.tree);
        let _ = self.open_elements.pop();
        Ok(())
    }

    fn end_document(&mut self) -> Result<FoDocument, BuildError> {
        self.ensure_active("end_document")?;

        if let Some(delegate) = &self.delegate {
            let message = format!(
                "unclosed foreign element {} ({} open)",
                self.name_of(delegate.node),
                delegate.fragment.depth()
            );
            return Err(self.fail(BuildError::EventStream(message)));
        }
        if !self.open_elements.is_empty() || self.skip_depth > 0 {
            let mut open: Vec<&str> = self
                .open_elements
                .iter()
                .map(|open| open.local_name.as_str())
                .collect();
            if self.skip_depth > 0 {
                open.push("(ignored element)");
            }
            let message = format!("unclosed elements: {}", open.join(", "));
            return Err(self.fail(BuildError::EventStream(message)));
        }
        if self.tree.document_element().is_none() {
            return Err(self.fail(BuildError::EventStream(
                "the document has no fo:root".to_string(),
            )));
        }

        let unresolved: Vec<String> = self
            .ids
            .unresolved()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        for id in unresolved {
            let event = ValidationEvent::new(
                Severity::Warning,
                EventKind::IdReference,
                format!("ref-id \"{id}\" does not match any id"),
            )
            .with_property(PropertyId::RefId.to_string());
            self.report(event);
        }

        self.handler.end_document();
        self.phase = BuilderState::Finished;
        Ok(FoDocument {
            tree: std::mem::take(&mut self.tree),
            events: std::mem::take(&mut self.events),
            ids: std::mem::take(&mut self.ids),
            fonts: std::mem::take(&mut self.fonts),
        })
    }
}
