use log::{debug, warn};

use super::{Event, EventKind, Listener, NodeId, Rect, RenderTarget, ScrollToOptions};

const DEFAULT_VIEWPORT_HEIGHT: f64 = 768.0;

#[derive(Clone, Debug)]
enum Child {
    Element(NodeId),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    children: Vec<Child>,
    parent: Option<NodeId>,
    layout: Rect,
    listeners: Vec<(EventKind, Listener)>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Node {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
            parent: None,
            layout: Rect::default(),
            listeners: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.attribute("class")
                .map(|classes| classes.split_whitespace().any(|c| c == class))
                .unwrap_or(false)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.attribute("id") == Some(id)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }
}

/// In-memory element tree rooted at `<body>`.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    inner_height: f64,
    scroll_y: f64,
    scroll_log: Vec<ScrollToOptions>,
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Document {
            nodes: vec![Node::new("body")],
            root: NodeId(0),
            inner_height: DEFAULT_VIEWPORT_HEIGHT,
            scroll_y: 0.0,
            scroll_log: Vec::new(),
        }
    }

    pub fn with_viewport_height(mut self, inner_height: f64) -> Self {
        self.inner_height = inner_height;
        self
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tag_name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attribute(name)
    }

    pub fn class_name(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "class")
    }

    /// Element children of `node`, in order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0]
            .children
            .iter()
            .filter_map(|child| match child {
                Child::Element(id) => Some(*id),
                Child::Text(_) => None,
            })
            .collect()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Every connected descendant of `node` matching `selector`, in document order.
    pub fn query_selector_all_in(&self, node: NodeId, selector: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_matches(node, selector, &mut found);
        found
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_selector_all_in(self.root, selector)
    }

    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    pub fn set_layout(&mut self, node: NodeId, rect: Rect) {
        self.nodes[node.0].layout = rect;
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn scroll_log(&self) -> &[ScrollToOptions] {
        &self.scroll_log
    }

    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.nodes[node.0]
            .listeners
            .iter()
            .filter(|(registered, _)| *registered == kind)
            .count()
    }

    /// Runs the listeners `node` registered for this event, in registration order.
    pub fn dispatch(&mut self, node: NodeId, event: Event) {
        let kind = event.kind();
        let listeners: Vec<Listener> = self.nodes[node.0]
            .listeners
            .iter()
            .filter(|(registered, _)| *registered == kind)
            .map(|(_, listener)| *listener)
            .collect();
        debug!("Dispatching {:?} to {} listener(s)", kind, listeners.len());
        for listener in listeners {
            listener.handle(self, node, &event);
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(self.root, &mut html);
        html
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, node)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    fn collect_matches(&self, node: NodeId, selector: &str, found: &mut Vec<NodeId>) {
        for child in self.children(node) {
            if self.nodes[child.0].matches(selector) {
                found.push(child);
            }
            self.collect_matches(child, selector, found);
        }
    }

    fn collect_text(&self, node: NodeId, text: &mut String) {
        for child in &self.nodes[node.0].children {
            match child {
                Child::Text(run) => text.push_str(run),
                Child::Element(id) => self.collect_text(*id, text),
            }
        }
    }

    fn write_html(&self, node: NodeId, html: &mut String) {
        let element = &self.nodes[node.0];
        html.push('<');
        html.push_str(&element.tag);
        for (name, value) in &element.attributes {
            html.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
        }
        if !element.styles.is_empty() {
            let style = element
                .styles
                .iter()
                .map(|(property, value)| format!("{}: {}", property, value))
                .collect::<Vec<String>>()
                .join("; ");
            html.push_str(&format!(" style=\"{}\"", escape_attribute(&style)));
        }
        html.push('>');
        for child in &element.children {
            match child {
                Child::Text(run) => html.push_str(&escape_text(run)),
                Child::Element(id) => self.write_html(*id, html),
            }
        }
        html.push_str(&format!("</{}>", element.tag));
    }
}

impl RenderTarget for Document {
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector(&format!("#{}", id))
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let attributes = &mut self.nodes[node.0].attributes;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        let removed = std::mem::take(&mut self.nodes[node.0].children);
        for child in removed {
            if let Child::Element(id) = child {
                self.nodes[id.0].parent = None;
            }
        }
        if !text.is_empty() {
            self.nodes[node.0].children.push(Child::Text(text.to_string()));
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.is_inclusive_ancestor(child, parent) {
            warn!("Refusing to append an element inside itself");
            return;
        }
        if let Some(previous) = self.nodes[child.0].parent {
            self.nodes[previous.0]
                .children
                .retain(|existing| !matches!(existing, Child::Element(id) if *id == child));
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(Child::Element(child));
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let styles = &mut self.nodes[node.0].styles;
        match styles.iter_mut().find(|(key, _)| key == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => styles.push((property.to_string(), value.to_string())),
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes[node.0]
            .styles
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.clone())
    }

    fn bounding_client_rect(&self, node: NodeId) -> Rect {
        if self.is_connected(node) {
            self.nodes[node.0].layout
        } else {
            Rect::default()
        }
    }

    fn add_event_listener(&mut self, node: NodeId, kind: EventKind, listener: Listener) {
        self.nodes[node.0].listeners.push((kind, listener));
    }

    fn inner_height(&self) -> f64 {
        self.inner_height
    }

    fn scroll_to(&mut self, options: ScrollToOptions) {
        self.scroll_y = options.top;
        self.scroll_log.push(options);
    }
}

pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
