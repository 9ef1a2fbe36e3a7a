use loopscroll::{ScrollView, ScrollViewOptions, Vec2};
use loopscroll_adapter::{ElementId, MemoryHost, TemplateSpec};

fn main() {
    // Example: a 10k-row list of varying heights, scrolled top to bottom.
    let mut host = MemoryHost::new();
    let row = host.register(TemplateSpec::new("row", Vec2::new(200.0, 16.0)));
    let mut view: ScrollView<MemoryHost> = ScrollView::new(
        host,
        ScrollViewOptions::new(Vec2::new(200.0, 120.0)).with_default_template(row),
    );
    view.init_by_index(
        None,
        |host: &mut MemoryHost, el: ElementId, i: usize| {
            host.set_content(el, format!("row {i}"));
            host.set_extent(el, loopscroll::Axis::Vertical, 16.0 + (i % 4) as f32 * 8.0);
        },
        None,
    )
    .expect("fresh view");
    view.refresh_view_by_count(10_000)
        .expect("layout must succeed");
    println!("content={:?}", view.content_size());

    for step in 0..=4 {
        let y = step as f32 / 4.0;
        view.on_scroll(Vec2::new(0.0, y)).expect("initialized");
        let shown: Vec<&str> = view
            .visible_indices()
            .iter()
            .filter_map(|&i| view.rendered_element(i))
            .filter_map(|el| view.host().content(el))
            .collect();
        println!("y={y:.2} shown={shown:?}");
    }

    let host = view.teardown();
    println!(
        "elements created={} destroyed={}",
        host.created_count(),
        host.destroyed_count()
    );
}
