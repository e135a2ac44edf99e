use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::cube::{self, TextureCache};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use turnstile::{Carousel, CarouselConfig, CarouselControl, CarouselEvent, NavKey, Point};

pub struct AppModel {
    pub carousel: Rc<RefCell<Carousel>>,
    pub textures: Rc<RefCell<TextureCache>>,
    pub title: String,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    /// `reduced_motion` as configured, before the desktop preference is applied.
    configured_reduced_motion: bool,
    drag_origin: Option<Point>,
    tick: Option<gtk::TickCallbackId>,
}

#[derive(Debug)]
pub enum AppMsg {
    Next,
    Prev,
    SetAutoplay(bool),
    ConfigReload,
    Key(NavKey),
    DragBegin(Point),
    /// Offset from the drag start.
    DragUpdate(f64, f64),
    DragEnd,
    DragCancel,
    /// The desktop's animation preference changed.
    SystemReducedMotion(bool),
    Frame(Duration),
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Next => AppMsg::Next,
            AppEvent::Prev => AppMsg::Prev,
            AppEvent::SetAutoplay(on) => AppMsg::SetAutoplay(on),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Either the config or the desktop can ask for reduced motion.
fn reduced_motion(configured: bool, system: bool) -> bool {
    configured || system
}

fn effective_settings(mut settings: CarouselConfig) -> CarouselConfig {
    settings.reduced_motion =
        reduced_motion(settings.reduced_motion, window::prefers_reduced_motion());
    settings
}

fn title_for(carousel: &Carousel) -> String {
    match carousel.announcement() {
        Some(announcement) => format!("Prism - {}", announcement),
        None => "Prism".to_string(),
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(&model.title),
            add_css_class: "prism-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    if let Some(nav) = window::nav_key(key) {
                        sender.input(AppMsg::Key(nav));
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_focusable: true,
                add_css_class: "prism-stage",

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::DragBegin(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |_, dx, dy| {
                        sender.input(AppMsg::DragUpdate(dx, dy));
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::DragEnd);
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::DragCancel);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let settings = effective_settings(config.carousel);
        let carousel = Carousel::new(config.items, settings);
        let title = title_for(&carousel);

        let model = AppModel {
            carousel: Rc::new(RefCell::new(carousel)),
            textures: Rc::new(RefCell::new(TextureCache::new())),
            title,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            configured_reduced_motion: config.carousel.reduced_motion,
            drag_origin: None,
            tick: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        window::resize_stage(&model.drawing_area, &settings);

        let carousel_draw = model.carousel.clone();
        let textures_draw = model.textures.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = cube::draw(
                    cr,
                    &carousel_draw.borrow(),
                    &mut textures_draw.borrow_mut(),
                    &colors,
                    width as f64,
                    height as f64,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let last_frame = Cell::new(None);
        let sender_tick = sender.clone();
        model.tick = Some(widgets.drawing_area.add_tick_callback(move |_, clock| {
            let now = clock.frame_time();
            let dt = window::frame_delta(last_frame.replace(Some(now)), now);
            sender_tick.input(AppMsg::Frame(dt));
            glib::ControlFlow::Continue
        }));

        if let Some(gtk_settings) = gtk::Settings::default() {
            let sender_motion = sender.clone();
            gtk_settings.connect_gtk_enable_animations_notify(move |gtk_settings| {
                sender_motion.input(AppMsg::SystemReducedMotion(
                    !gtk_settings.is_gtk_enable_animations(),
                ));
            });
        }

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        model.announce();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Next => {
                self.carousel.borrow_mut().next();
            }
            AppMsg::Prev => {
                self.carousel.borrow_mut().prev();
            }
            AppMsg::Key(key) => {
                self.carousel.borrow_mut().key(key);
            }
            AppMsg::SetAutoplay(on) => {
                self.carousel.borrow_mut().set_autoplay(on);
                log::info!("Autoplay {}", if on { "on" } else { "off" });
            }
            AppMsg::DragBegin(point) => {
                if self.carousel.borrow_mut().pointer_down(point) {
                    self.drag_origin = Some(point);
                    self.drawing_area.grab_focus();
                }
            }
            AppMsg::DragUpdate(dx, dy) => {
                if let Some(origin) = self.drag_origin
                    && self
                        .carousel
                        .borrow_mut()
                        .pointer_move(Point::new(origin.x + dx, origin.y + dy))
                {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::DragEnd => {
                if self.drag_origin.take().is_some() {
                    self.carousel.borrow_mut().pointer_up();
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::DragCancel => {
                if self.drag_origin.take().is_some() {
                    self.carousel.borrow_mut().pointer_cancel();
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::SystemReducedMotion(reduced) => {
                let reduced = reduced_motion(self.configured_reduced_motion, reduced);
                self.carousel.borrow_mut().set_reduced_motion(reduced);
                log::debug!("Reduced motion {}", if reduced { "on" } else { "off" });
            }
            AppMsg::Frame(dt) => {
                let (event, redraw) = {
                    let mut carousel = self.carousel.borrow_mut();
                    let was_animating = carousel.is_animating();
                    let event = carousel.tick(dt);
                    (event, was_animating || carousel.is_animating())
                };
                if let Some(event) = event {
                    self.on_event(event);
                }
                if redraw {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Close => self.root.close(),
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.carousel.borrow_mut().teardown();
        if let Some(tick) = self.tick.take() {
            tick.remove();
        }
    }
}

impl AppModel {
    fn on_event(&mut self, event: CarouselEvent) {
        match event {
            CarouselEvent::IndexChanged(index) => {
                log::debug!("Now showing item {}", index);
                self.announce();
            }
        }
    }

    /// Publishes the settled item to the window title and assistive technology.
    fn announce(&mut self) {
        let carousel = self.carousel.borrow();
        self.title = title_for(&carousel);
        if let Some(announcement) = carousel.announcement() {
            let text = announcement.to_string();
            self.drawing_area
                .update_property(&[gtk::accessible::Property::Description(&text)]);
        }
    }

    fn apply_config(&mut self, new_config: Config) {
        self.configured_reduced_motion = new_config.carousel.reduced_motion;
        let settings = effective_settings(new_config.carousel);
        {
            let mut carousel = self.carousel.borrow_mut();
            carousel.set_config(settings);
            carousel.set_items(new_config.items);
        }
        self.textures.borrow_mut().clear();
        window::resize_stage(&self.drawing_area, &settings);
        self.announce();
        self.drawing_area.queue_draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_follows_config_or_desktop() {
        assert!(!reduced_motion(false, false));
        assert!(reduced_motion(true, false));
        assert!(reduced_motion(false, true));
        assert!(reduced_motion(true, true));
    }

    #[test]
    fn test_control_events_map_to_messages() {
        assert!(matches!(AppMsg::from(AppEvent::Next), AppMsg::Next));
        assert!(matches!(
            AppMsg::from(AppEvent::SetAutoplay(false)),
            AppMsg::SetAutoplay(false)
        ));
    }
}
