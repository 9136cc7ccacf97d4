use chrono::{Datelike, Local, NaiveDate};
use log::{error, info};

use crate::{
    dom::{EventKind, Listener, NodeId, RenderTarget},
    error::FolioError,
    render::render_all,
    types::Catalog,
};

/// Selectors for the elements the page script drives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSelectors {
    pub projects_grid: String,
    pub scroll_indicator: String,
    /// Element id, not a selector.
    pub current_year: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        PageSelectors {
            projects_grid: ".projects-grid".to_string(),
            scroll_indicator: ".scroll-indicator".to_string(),
            current_year: "current-year".to_string(),
        }
    }
}

/// Wires the page once its content is in place, stamping today's year.
pub fn initialize<T: RenderTarget + ?Sized>(
    catalog: &Catalog,
    target: &mut T,
    selectors: &PageSelectors,
) -> Result<Vec<NodeId>, FolioError> {
    initialize_on(catalog, target, selectors, Local::now().date_naive())
}

/// Scroll indicator first, then the footer year, then the cards. The first
/// missing element stops everything after it.
pub fn initialize_on<T: RenderTarget + ?Sized>(
    catalog: &Catalog,
    target: &mut T,
    selectors: &PageSelectors,
    today: NaiveDate,
) -> Result<Vec<NodeId>, FolioError> {
    attach_scroll_indicator(target, &selectors.scroll_indicator)?;
    stamp_year(target, &selectors.current_year, today)?;
    let cards = render_all(catalog, target, &selectors.projects_grid)?;
    info!("Page initialized with {} project card(s)", cards.len());
    Ok(cards)
}

pub fn attach_scroll_indicator<T: RenderTarget + ?Sized>(
    target: &mut T,
    selector: &str,
) -> Result<NodeId, FolioError> {
    let indicator = required(target.query_selector(selector), selector)?;
    target.add_event_listener(indicator, EventKind::Click, Listener::ScrollPastViewport);
    Ok(indicator)
}

pub fn stamp_year<T: RenderTarget + ?Sized>(
    target: &mut T,
    element_id: &str,
    today: NaiveDate,
) -> Result<NodeId, FolioError> {
    let node = required(target.get_element_by_id(element_id), element_id)?;
    target.set_text_content(node, &today.year().to_string());
    Ok(node)
}

/// Builds the skeleton the stylesheet expects: hero with scroll indicator,
/// the projects grid and a footer holding the year. The hooks carry the
/// class or id named by `selectors`, so `initialize` finds them.
pub fn build_shell<T: RenderTarget + ?Sized>(
    target: &mut T,
    body: NodeId,
    site_title: &str,
    selectors: &PageSelectors,
) {
    let hero = target.create_element("header");
    target.set_class_name(hero, "hero");
    let heading = target.create_element("h1");
    target.set_text_content(heading, site_title);
    target.append_child(hero, heading);
    let indicator = hook_element(target, "div", &selectors.scroll_indicator);
    target.append_child(hero, indicator);
    target.append_child(body, hero);

    let projects = target.create_element("section");
    target.set_class_name(projects, "projects");
    let grid = hook_element(target, "div", &selectors.projects_grid);
    target.append_child(projects, grid);
    target.append_child(body, projects);

    let footer = target.create_element("footer");
    let copyright = target.create_element("p");
    let year = target.create_element("span");
    target.set_attribute(year, "id", &selectors.current_year);
    target.append_child(copyright, year);
    target.append_child(footer, copyright);
    target.append_child(body, footer);
}

// `.name` and `#name` become a class or id on `tag`; anything else is the tag itself.
fn hook_element<T: RenderTarget + ?Sized>(target: &mut T, tag: &str, selector: &str) -> NodeId {
    if let Some(class_name) = selector.strip_prefix('.') {
        let node = target.create_element(tag);
        target.set_class_name(node, class_name);
        node
    } else if let Some(id) = selector.strip_prefix('#') {
        let node = target.create_element(tag);
        target.set_attribute(node, "id", id);
        node
    } else {
        target.create_element(selector)
    }
}

fn required(node: Option<NodeId>, selector: &str) -> Result<NodeId, FolioError> {
    node.ok_or_else(|| {
        error!("Required element \"{}\" not found", selector);
        FolioError::MissingElement(selector.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dom::{Document, Event, Rect, ScrollBehavior, ScrollToOptions},
        tilt::TiltState,
        types::ProjectRecord,
    };

    fn shell() -> Document {
        let mut doc = Document::new().with_viewport_height(720.0);
        let body = doc.root();
        build_shell(&mut doc, body, "Portfolio", &PageSelectors::default());
        doc
    }

    fn date(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 6, 1).unwrap()
    }

    #[test]
    fn initialize_renders_stamps_and_wires() {
        let mut doc = shell();
        let catalog = Catalog::new(vec![ProjectRecord::new("A", "d", &["X", "Y"], "https://x")]);

        let cards =
            initialize_on(&catalog, &mut doc, &PageSelectors::default(), date(2024)).unwrap();

        assert_eq!(cards.len(), 1);
        let year = doc.get_element_by_id("current-year").unwrap();
        assert_eq!(doc.text_content(year), "2024");
        let indicator = doc.query_selector(".scroll-indicator").unwrap();
        assert_eq!(doc.listener_count(indicator, EventKind::Click), 1);
    }

    #[test]
    fn initialize_uses_current_year() {
        let mut doc = shell();
        initialize(&Catalog::builtin(), &mut doc, &PageSelectors::default()).unwrap();
        let year = doc.get_element_by_id("current-year").unwrap();
        assert_eq!(doc.text_content(year), Local::now().year().to_string());
    }

    #[test]
    fn click_scrolls_one_viewport_smoothly() {
        let mut doc = shell();
        initialize_on(&Catalog::builtin(), &mut doc, &PageSelectors::default(), date(2024))
            .unwrap();
        let indicator = doc.query_selector(".scroll-indicator").unwrap();

        doc.dispatch(indicator, Event::Click);
        doc.dispatch(indicator, Event::Click);

        let expected = ScrollToOptions {
            top: 720.0,
            behavior: ScrollBehavior::Smooth,
        };
        assert_eq!(doc.scroll_log(), [expected, expected]);
        assert_eq!(doc.scroll_y(), 720.0);
    }

    #[test]
    fn pointer_events_tilt_and_reset_each_card_independently() {
        let mut doc = shell();
        let catalog = Catalog::new(vec![
            ProjectRecord::new("A", "d", &[], "https://a"),
            ProjectRecord::new("B", "d", &[], "https://b"),
        ]);
        let cards =
            initialize_on(&catalog, &mut doc, &PageSelectors::default(), date(2024)).unwrap();
        doc.set_layout(cards[0], Rect::new(0.0, 0.0, 300.0, 200.0));
        doc.set_layout(cards[1], Rect::new(320.0, 0.0, 300.0, 200.0));

        doc.dispatch(
            cards[0],
            Event::PointerMove {
                client_x: 0.0,
                client_y: 0.0,
            },
        );
        let tilted = TiltState::Tilted {
            rotate_x: -10.0,
            rotate_y: 15.0,
        };
        assert_eq!(doc.style(cards[0], "transform"), Some(tilted.to_string()));
        assert_eq!(doc.style(cards[1], "transform"), None);

        doc.dispatch(
            cards[0],
            Event::PointerMove {
                client_x: 150.0,
                client_y: 100.0,
            },
        );
        let centered = TiltState::Tilted {
            rotate_x: 0.0,
            rotate_y: 0.0,
        };
        assert_eq!(doc.style(cards[0], "transform"), Some(centered.to_string()));

        doc.dispatch(cards[0], Event::PointerLeave);
        assert_eq!(
            doc.style(cards[0], "transform"),
            Some(TiltState::Idle.to_string())
        );
    }

    #[test]
    fn click_on_card_does_nothing() {
        let mut doc = shell();
        let cards =
            initialize_on(&Catalog::builtin(), &mut doc, &PageSelectors::default(), date(2024))
                .unwrap();
        doc.dispatch(cards[0], Event::Click);
        assert_eq!(doc.style(cards[0], "transform"), None);
        assert!(doc.scroll_log().is_empty());
    }

    #[test]
    fn missing_scroll_indicator_halts_initialization() {
        let mut doc = Document::new();
        let body = doc.root();
        let grid = doc.create_element("div");
        doc.set_class_name(grid, "projects-grid");
        doc.append_child(body, grid);
        let year = doc.create_element("span");
        doc.set_attribute(year, "id", "current-year");
        doc.append_child(body, year);

        let result = initialize_on(
            &Catalog::builtin(),
            &mut doc,
            &PageSelectors::default(),
            date(2024),
        );

        assert!(matches!(
            result,
            Err(FolioError::MissingElement(ref s)) if s == ".scroll-indicator"
        ));
        assert_eq!(doc.text_content(year), "");
        assert!(doc.children(grid).is_empty());
    }

    #[test]
    fn missing_grid_still_stamps_year() {
        let mut doc = shell();
        let selectors = PageSelectors {
            projects_grid: ".gallery".to_string(),
            ..PageSelectors::default()
        };
        let result = initialize_on(&Catalog::builtin(), &mut doc, &selectors, date(1999));

        assert!(matches!(result, Err(FolioError::MissingElement(ref s)) if s == ".gallery"));
        let year = doc.get_element_by_id("current-year").unwrap();
        assert_eq!(doc.text_content(year), "1999");
    }

    #[test]
    fn shell_follows_custom_selectors() {
        let selectors = PageSelectors {
            projects_grid: "#work".to_string(),
            scroll_indicator: ".down-arrow".to_string(),
            current_year: "year".to_string(),
        };
        let mut doc = Document::new();
        let body = doc.root();
        build_shell(&mut doc, body, "Portfolio", &selectors);

        let cards = initialize_on(&Catalog::builtin(), &mut doc, &selectors, date(2031)).unwrap();

        let grid = doc.get_element_by_id("work").unwrap();
        assert_eq!(doc.children(grid), cards);
        let indicator = doc.query_selector(".down-arrow").unwrap();
        assert_eq!(doc.listener_count(indicator, EventKind::Click), 1);
        assert_eq!(doc.text_content(doc.get_element_by_id("year").unwrap()), "2031");
        assert!(doc.query_selector(".projects-grid").is_none());
    }

    #[test]
    fn tag_selector_builds_that_tag() {
        let selectors = PageSelectors {
            projects_grid: "main".to_string(),
            ..PageSelectors::default()
        };
        let mut doc = Document::new();
        let body = doc.root();
        build_shell(&mut doc, body, "Portfolio", &selectors);

        let cards = initialize_on(&Catalog::builtin(), &mut doc, &selectors, date(2031)).unwrap();
        let grid = doc.query_selector("main").unwrap();
        assert_eq!(doc.children(grid), cards);
    }

    #[test]
    fn shell_has_expected_hooks() {
        let doc = shell();
        assert!(doc.query_selector(".hero").is_some());
        assert!(doc.query_selector(".scroll-indicator").is_some());
        assert!(doc.query_selector(".projects-grid").is_some());
        assert!(doc.get_element_by_id("current-year").is_some());
        assert_eq!(doc.text_content(doc.query_selector("h1").unwrap()), "Portfolio");
    }
}
