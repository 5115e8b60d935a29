use super::*;
use crate::backend::HeadlessBackend;
use crate::config::Config;
use crate::draw::OptionKey;
use crate::input::{InputEvent, Key, MouseButton};
use crate::scene::{Drawable, Entry, Image, Rectangle};

fn create_test_context() -> (Graphics, HeadlessBackend) {
    let backend = HeadlessBackend::new();
    let mut config = Config::default();
    config.input.poll_interval_ms = 1;
    (Graphics::with_config(backend.clone(), config), backend)
}

fn square(x1: f64, y1: f64, x2: f64, y2: f64) -> Rectangle {
    Rectangle::new(&Point::new(x1, y1), &Point::new(x2, y2))
}

fn item_origin(backend: &HeadlessBackend, win: &Window, graphic: &Graphic) -> (f64, f64) {
    let id = graphic.item().unwrap();
    backend.item(win.surface(), id).unwrap().primitive.origin()
}

#[test]
fn test_open_rejects_zero_size() {
    let (ctx, _) = create_test_context();
    assert!(matches!(
        Window::open(&ctx, "bad", 0, 10),
        Err(GraphicsError::InvalidSize { width: 0, height: 10 })
    ));
}

#[test]
fn test_open_and_close_lifecycle() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "Board", 30, 20).unwrap();
    assert_eq!(win.to_string(), "Window('Board', 30, 20)");
    assert_eq!(backend.title(win.surface()).as_deref(), Some("Board"));
    assert!(win.is_open());
    assert_eq!(ctx.open_windows(), 1);

    win.close();
    win.close();
    assert!(win.is_closed());
    assert!(!backend.is_open(win.surface()));
    assert_eq!(win.to_string(), "<Closed Window>");
    assert_eq!(ctx.open_windows(), 0);
}

#[test]
fn test_closed_window_rejects_operations() {
    let (ctx, _) = create_test_context();
    let win = Window::open(&ctx, "w", 20, 20).unwrap();
    win.close();
    assert!(matches!(win.set_background("red"), Err(GraphicsError::ClosedWindow(_))));
    assert!(matches!(win.set_coords(0.0, 0.0, 1.0, 1.0), Err(GraphicsError::ClosedWindow(_))));
    assert!(matches!(win.plot(1.0, 1.0, "red"), Err(GraphicsError::ClosedWindow(_))));
    assert!(matches!(win.flush(), Err(GraphicsError::ClosedWindow(_))));
    assert!(matches!(win.check_mouse(), Err(GraphicsError::ClosedWindow(_))));
    assert!(matches!(win.check_key(), Err(GraphicsError::ClosedWindow(_))));
    assert!(matches!(win.get_mouse(), Err(GraphicsError::ClosedWindow(_))));
}

#[test]
fn test_draw_then_undraw_leaves_no_registration() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 50, 50).unwrap();
    let rect = square(1.0, 1.0, 10.0, 10.0);

    rect.draw(&win).unwrap();
    assert_eq!(win.item_count(), 1);
    assert!(win.contains(rect.graphic()));
    assert_eq!(backend.items(win.surface()).len(), 1);

    rect.undraw();
    rect.undraw();
    assert_eq!(win.item_count(), 0);
    assert!(backend.items(win.surface()).is_empty());
    assert!(!rect.is_drawn());
}

#[test]
fn test_draw_twice_fails_until_window_closes() {
    let (ctx, _) = create_test_context();
    let first = Window::open(&ctx, "first", 50, 50).unwrap();
    let second = Window::open(&ctx, "second", 50, 50).unwrap();
    let rect = square(1.0, 1.0, 10.0, 10.0);

    rect.draw(&first).unwrap();
    assert!(matches!(rect.draw(&first), Err(GraphicsError::AlreadyDrawn)));
    assert!(matches!(rect.draw(&second), Err(GraphicsError::AlreadyDrawn)));

    first.close();
    rect.draw(&second).unwrap();
    assert!(second.contains(rect.graphic()));

    second.close();
    let other = square(0.0, 0.0, 1.0, 1.0);
    assert!(matches!(
        other.draw(&second),
        Err(GraphicsError::ClosedWindow("Can't draw to closed window"))
    ));
}

#[test]
fn test_set_coords_redraws_every_item() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 101, 101).unwrap();
    let a = square(10.0, 10.0, 20.0, 20.0);
    let b = square(30.0, 40.0, 50.0, 60.0);
    a.draw(&win).unwrap();
    b.draw(&win).unwrap();
    assert_eq!(item_origin(&backend, &win, a.graphic()), (10.0, 10.0));

    win.set_coords(0.0, 0.0, 100.0, 100.0).unwrap();
    assert_eq!(win.item_count(), 2);
    assert_eq!(backend.items(win.surface()).len(), 2);
    assert_eq!(item_origin(&backend, &win, a.graphic()), (10.0, 90.0));
    assert_eq!(item_origin(&backend, &win, b.graphic()), (30.0, 60.0));

    // z-order survives the redraw
    let items = backend.items(win.surface());
    assert_eq!(items[0].id, a.graphic().item().unwrap());
    assert_eq!(items[1].id, b.graphic().item().unwrap());
}

#[test]
fn test_set_coords_needs_two_pixels() {
    let (ctx, _) = create_test_context();
    let win = Window::open(&ctx, "thin", 1, 40).unwrap();
    assert!(matches!(
        win.set_coords(0.0, 0.0, 1.0, 1.0),
        Err(GraphicsError::InvalidSize { width: 1, height: 40 })
    ));
}

#[test]
fn test_move_translates_in_device_space() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 101, 101).unwrap();
    win.set_coords(0.0, 0.0, 50.0, 50.0).unwrap();
    let rect = square(10.0, 10.0, 20.0, 20.0);
    rect.draw(&win).unwrap();
    assert_eq!(item_origin(&backend, &win, rect.graphic()), (20.0, 80.0));

    rect.move_by(5.0, 5.0);
    assert_eq!(rect.get_p1(), Point::new(15.0, 15.0));
    assert_eq!(rect.get_p2(), Point::new(25.0, 25.0));
    assert_eq!(item_origin(&backend, &win, rect.graphic()), (30.0, 70.0));
}

#[test]
fn test_configure_pushes_to_drawn_item() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 50, 50).unwrap();
    let rect = square(1.0, 1.0, 10.0, 10.0);
    rect.draw(&win).unwrap();
    rect.set_fill("red").unwrap();
    rect.set_width(3.0).unwrap();

    let item = backend
        .item(win.surface(), rect.graphic().item().unwrap())
        .unwrap();
    assert_eq!(item.options.color(OptionKey::Fill), "red");
    assert_eq!(item.options.width(), 3.0);
}

#[test]
fn test_plot_places_single_pixel_marks() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 101, 101).unwrap();
    win.plot_pixel(3.0, 4.0, "red").unwrap();
    win.set_coords(0.0, 0.0, 100.0, 100.0).unwrap();
    win.plot(10.0, 10.0, "").unwrap();

    let items = backend.items(win.surface());
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].primitive.origin(), (3.0, 4.0));
    assert_eq!(items[0].options.color(OptionKey::Fill), "red");
    assert_eq!(items[1].primitive.origin(), (10.0, 90.0));
    assert_eq!(items[1].options.color(OptionKey::Fill), "black");
    // plotted marks are not scene objects
    assert_eq!(win.item_count(), 0);
}

#[test]
fn test_background_and_flush() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 20, 20).unwrap();
    win.set_background("blue").unwrap();
    assert_eq!(backend.background(win.surface()).as_deref(), Some("blue"));

    let dispatches = backend.dispatch_count();
    win.flush().unwrap();
    assert!(backend.has_canvas(win.surface()));
    assert_eq!(backend.dispatch_count(), dispatches);
}

#[test]
fn test_coordinate_conversions() {
    let (ctx, _) = create_test_context();
    let win = Window::open(&ctx, "w", 101, 101).unwrap();
    assert_eq!(win.to_screen(3.0, 4.0), (3.0, 4.0));
    win.set_coords(0.0, 0.0, 10.0, 10.0).unwrap();
    assert_eq!(win.to_screen(0.0, 0.0), (0.0, 100.0));
    assert_eq!(win.to_screen(10.0, 10.0), (100.0, 0.0));
    let (x, y) = win.to_world(50.0, 50.0);
    assert!((x - 5.0).abs() < 1e-9);
    assert!((y - 5.0).abs() < 1e-9);
}

#[test]
fn test_get_mouse_returns_world_point() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 101, 101).unwrap();
    win.set_coords(0.0, 0.0, 100.0, 100.0).unwrap();
    backend.push_event_after(
        2,
        InputEvent::Click {
            surface: win.surface(),
            button: MouseButton::Left,
            x: 50,
            y: 25,
        },
    );
    assert_eq!(win.get_mouse().unwrap(), Point::new(50.0, 75.0));
    assert_eq!(win.check_mouse().unwrap(), None);
}

#[test]
fn test_get_mouse_discards_stale_click() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 50, 50).unwrap();
    backend.click(win.surface(), 1, 1);
    backend.push_event_after(
        1,
        InputEvent::Click {
            surface: win.surface(),
            button: MouseButton::Left,
            x: 7,
            y: 8,
        },
    );
    assert_eq!(win.get_mouse().unwrap(), Point::new(7.0, 8.0));
}

#[test]
fn test_check_mouse_does_not_block() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 50, 50).unwrap();
    assert_eq!(win.check_mouse().unwrap(), None);

    backend.click(win.surface(), 4, 5);
    assert_eq!(win.check_mouse().unwrap(), Some(Point::new(4.0, 5.0)));
    assert_eq!(win.check_mouse().unwrap(), None);
}

#[test]
fn test_right_clicks_are_not_recorded() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 50, 50).unwrap();
    backend.push_event(InputEvent::Click {
        surface: win.surface(),
        button: MouseButton::Right,
        x: 4,
        y: 5,
    });
    assert_eq!(win.check_mouse().unwrap(), None);
}

#[test]
fn test_mouse_handler_sees_device_coordinates() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 101, 101).unwrap();
    win.set_coords(0.0, 0.0, 100.0, 100.0).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    win.set_mouse_handler(move |p| sink.borrow_mut().push((p.x(), p.y())));

    backend.click(win.surface(), 10, 20);
    assert_eq!(win.check_mouse().unwrap(), Some(Point::new(10.0, 80.0)));
    assert_eq!(seen.borrow().as_slice(), &[(10.0, 20.0)]);

    backend.click(win.surface(), 1, 2);
    ctx.update(None);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_keys_are_reported_as_keysyms() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 50, 50).unwrap();
    backend.push_event_after(
        1,
        InputEvent::Key {
            surface: win.surface(),
            key: Key::Char('q'),
        },
    );
    assert_eq!(win.get_key().unwrap(), "q");

    assert_eq!(win.check_key().unwrap(), None);
    backend.press_key(win.surface(), Key::Return);
    assert_eq!(win.check_key().unwrap().as_deref(), Some("Return"));
    assert_eq!(win.check_key().unwrap(), None);
}

#[test]
fn test_close_request_ends_blocking_wait() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 50, 50).unwrap();
    backend.push_event_after(
        1,
        InputEvent::CloseRequested {
            surface: win.surface(),
        },
    );
    assert!(matches!(
        win.get_mouse(),
        Err(GraphicsError::ClosedWindow("getMouse in closed window"))
    ));
    assert!(win.is_closed());
    assert!(!backend.is_open(win.surface()));
}

#[test]
fn test_close_request_ends_key_wait() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 50, 50).unwrap();
    backend.request_close(win.surface());
    assert!(matches!(
        win.get_key(),
        Err(GraphicsError::ClosedWindow("getKey in closed window"))
    ));
}

#[test]
fn test_autoflush_controls_pumping() {
    let (ctx, backend) = create_test_context();
    let manual = Window::open_with(&ctx, "manual", 50, 50, false).unwrap();
    let before = backend.dispatch_count();
    square(1.0, 1.0, 5.0, 5.0).draw(&manual).unwrap();
    assert_eq!(backend.dispatch_count(), before);

    let auto = Window::open(&ctx, "auto", 50, 50).unwrap();
    let before = backend.dispatch_count();
    square(1.0, 1.0, 5.0, 5.0).draw(&auto).unwrap();
    assert_eq!(backend.dispatch_count(), before + 1);
}

#[test]
fn test_drawn_image_is_pinned_until_undrawn() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 50, 50).unwrap();
    let img = Image::blank(&ctx, &Point::new(25.0, 25.0), 4, 4);
    assert!(!ctx.is_image_pinned(img.id()));

    img.draw(&win).unwrap();
    assert!(ctx.is_image_pinned(img.id()));
    assert_eq!(ctx.live_images(), 1);
    assert_eq!(backend.items(win.surface()).len(), 1);

    img.undraw();
    assert!(!ctx.is_image_pinned(img.id()));
    assert_eq!(ctx.live_images(), 0);
}

#[test]
fn test_entry_receives_typed_text() {
    let (ctx, backend) = create_test_context();
    let win = Window::open(&ctx, "w", 100, 50).unwrap();
    let entry = Entry::new(&Point::new(50.0, 25.0), 10);
    entry.set_text("x=");
    entry.draw(&win).unwrap();

    backend.type_text(win.surface(), "12");
    ctx.update(None);
    assert_eq!(entry.get_text(), "x=12");
}

#[test]
fn test_shutdown_closes_every_window() {
    let (ctx, backend) = create_test_context();
    let a = Window::open(&ctx, "a", 20, 20).unwrap();
    let b = Window::open(&ctx, "b", 20, 20).unwrap();
    ctx.shutdown();
    assert!(a.is_closed() && b.is_closed());
    assert!(!backend.is_open(a.surface()));
    assert_eq!(ctx.open_windows(), 0);
}

#[test]
fn test_dropping_open_window_releases_surface() {
    let (ctx, backend) = create_test_context();
    let surface = {
        let win = Window::open(&ctx, "temp", 20, 20).unwrap();
        win.surface()
    };
    assert!(!backend.is_open(surface));
    assert_eq!(ctx.open_windows(), 0);
}

#[test]
fn test_from_config_uses_window_section() {
    let backend = HeadlessBackend::new();
    let mut config = Config::default();
    config.window.title = "Configured".into();
    config.window.width = 64;
    config.window.background = "black".into();
    let ctx = Graphics::with_config(backend.clone(), config);

    let win = Window::from_config(&ctx).unwrap();
    assert_eq!(win.get_width(), 64);
    assert_eq!(win.get_height(), 200);
    assert_eq!(backend.background(win.surface()).as_deref(), Some("black"));
    assert_eq!(win.title(), "Configured");
}
