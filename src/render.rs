use log::{debug, error};

use crate::{
    dom::{EventKind, Listener, NodeId, RenderTarget},
    error::FolioError,
    types::{Catalog, ProjectRecord},
};

const LINK_LABEL: &str = "View Project";

/// Appends one card per project to the element matching `container_selector`.
///
/// Cards follow catalog order and are added after whatever the container
/// already holds, so calling this twice duplicates them. Returns the new
/// cards in order.
pub fn render_all<T: RenderTarget + ?Sized>(
    catalog: &Catalog,
    target: &mut T,
    container_selector: &str,
) -> Result<Vec<NodeId>, FolioError> {
    let container = target.query_selector(container_selector).ok_or_else(|| {
        error!("Project container \"{}\" not found", container_selector);
        FolioError::MissingElement(container_selector.to_string())
    })?;

    let cards = catalog
        .iter()
        .map(|project| {
            let card = create_card(target, project);
            target.append_child(container, card);
            target.add_event_listener(card, EventKind::PointerMove, Listener::Tilt);
            target.add_event_listener(card, EventKind::PointerLeave, Listener::ResetTilt);
            card
        })
        .collect::<Vec<NodeId>>();

    debug!("Rendered {} project card(s)", cards.len());
    Ok(cards)
}

fn create_card<T: RenderTarget + ?Sized>(target: &mut T, project: &ProjectRecord) -> NodeId {
    let card = element(target, "div", "card");
    let content = element(target, "div", "card-content");
    target.append_child(card, content);

    let title = element(target, "h2", "card-title");
    target.set_text_content(title, &project.title);
    target.append_child(content, title);

    let description = element(target, "p", "card-description");
    target.set_text_content(description, &project.description);
    target.append_child(content, description);

    let tech_stack = element(target, "div", "tech-stack");
    for tech in &project.tech_stack {
        let badge = element(target, "span", "tech-badge");
        target.set_text_content(badge, tech);
        target.append_child(tech_stack, badge);
    }
    target.append_child(content, tech_stack);

    let link = element(target, "a", "card-link");
    target.set_attribute(link, "href", &project.link);
    target.set_attribute(link, "target", "_blank");
    target.set_text_content(link, LINK_LABEL);
    target.append_child(content, link);

    card
}

fn element<T: RenderTarget + ?Sized>(target: &mut T, tag: &str, class_name: &str) -> NodeId {
    let node = target.create_element(tag);
    target.set_class_name(node, class_name);
    node
}
