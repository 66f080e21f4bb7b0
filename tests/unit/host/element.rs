use super::*;

#[test]
fn primary_family_is_unquoted_first_entry() {
    let mut c = ComputedStyle::default();
    c.font_family = "\"Inter Display\", Arial, sans-serif".to_owned();
    assert_eq!(c.primary_family(), "Inter Display");
    c.font_family = "  ".to_owned();
    assert_eq!(c.primary_family(), "sans-serif");
}

#[test]
fn normal_line_height_is_relative_to_font_size() {
    let mut c = ComputedStyle::default();
    c.font_size_px = 20.0;
    assert_eq!(c.line_height_px(), 24.0);
    c.line_height = LineHeight::Px(30.0);
    assert_eq!(c.line_height_px(), 30.0);
    c.line_height = LineHeight::Px(0.0);
    assert_eq!(c.line_height_px(), 24.0);
}

#[test]
fn attribute_prefix_removal() {
    let mut el = Element::new(ElementId(1), "x");
    el.set_attr("data-a-1", "1");
    el.set_attr("data-a-2", "2");
    el.set_attr("data-b", "3");
    let removed = el.remove_attrs_where(|k| k.starts_with("data-a-"));
    assert_eq!(removed, vec!["data-a-1".to_owned(), "data-a-2".to_owned()]);
    assert_eq!(el.attributes().len(), 1);
}

#[test]
fn style_text_is_sorted_declarations() {
    let mut el = Element::new(ElementId(1), "x");
    el.set_style("opacity", "0.5");
    el.set_style("color", "red");
    assert_eq!(el.style_text(), "color: red; opacity: 0.5;");
    assert_eq!(el.remove_style("color").as_deref(), Some("red"));
}

#[test]
fn elements_load_from_json_fixtures() {
    let el: Element = serde_json::from_str(
        r##"{
            "id": 4,
            "text": "Hi",
            "attributes": {"data-fill-color": "#FF0000"},
            "computed": {"size": {"width": 100.0, "height": 20.0}, "text_align": "center"}
        }"##,
    )
    .unwrap();
    assert_eq!(el.id, ElementId(4));
    assert_eq!(el.attr("data-fill-color"), Some("#FF0000"));
    assert_eq!(el.computed.text_align, TextAlign::Center);
    assert_eq!(el.computed.font_size_px, 16.0);
    assert!(el.running_animations().is_empty());
}

#[test]
fn document_counts_updates() {
    let mut doc = Document::new();
    let id = doc.insert(Element::new(ElementId(9), "x"));
    assert!(doc.element_mut(id).is_some());
    assert!(doc.element(ElementId(10)).is_none());
    doc.on_update();
    doc.on_update();
    assert_eq!(doc.update_count(), 2);
}
