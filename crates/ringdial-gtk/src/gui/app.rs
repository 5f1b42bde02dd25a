use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::board::Board;
use crate::gui::painter;
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use ringdial::{EventKind, Point, PointerEvent};
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub board: Rc<RefCell<Board>>,
    pub drawing_area: gtk::DrawingArea,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(EventKind, Point),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
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
            set_title: Some("Ringdial"),
            set_resizable: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_content_width: model.width,
                set_content_height: model.height,
                add_css_class: "ringdial-canvas",

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(EventKind::Press, Point::new(x, y)));
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            let end = Point::new(x + dx, y + dy);
                            sender.input(AppMsg::Pointer(EventKind::Release, end));
                        }
                    }
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Pointer(EventKind::Click, Point::new(x, y)));
                    }
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(EventKind::Move, Point::new(x, y)));
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

        let mut board = Board::new(config.width as f64, config.height as f64);
        if let Err(e) = board.rebuild(&config.sliders) {
            log::error!("Failed to build sliders: {:#}", e);
        }

        let model = AppModel {
            board: Rc::new(RefCell::new(board)),
            drawing_area: gtk::DrawingArea::default(),
            width: config.width,
            height: config.height,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let board_draw = model.board.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                if let Err(e) = painter::draw(cr, board_draw.borrow().scene(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(kind, point) => {
                let mut board = self.board.borrow_mut();
                let hit = painter::hit_test(board.scene(), point).unwrap_or_else(|e| {
                    log::error!("Hit test failed: {}", e);
                    None
                });
                if board.dispatch(hit, &PointerEvent::mouse(kind, point)) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => {
                let result = config::load_config()
                    .map_err(anyhow::Error::from)
                    .and_then(|c| self.board.borrow_mut().rebuild(&c.sliders));
                match result {
                    Ok(()) => {
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {:#}", e),
                }
            }
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}
