use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::{debug, error, info, trace};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tao::event::{ElementState, Event, StartCause, WindowEvent};
use tao::event_loop::{
    ControlFlow, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget,
};
use tao::keyboard::{KeyCode, ModifiersState};
use tao::window::{Window, WindowBuilder, WindowId as TaoWindowId};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use super::coordinator::Coordinator;
use super::events::{ConfirmChoice, HostEvent, WindowId};
use super::host::{AboutInfo, ConfirmPrompt, ContentRef, WindowHost, WindowOptions};
use super::menu::{Accelerator, Key, MenuRole};
use super::messages::{self, OutboundMessage};
use crate::error::HostError;
use crate::framework::config::AppConfig;

type Proxy = EventLoopProxy<HostEvent>;
type Target = EventLoopWindowTarget<HostEvent>;

struct HostedWindow {
    // Declared first so the web view drops before its window.
    web_view: Option<WebView>,
    window: Window,
    menu: Option<MenuRole>,
    // Written by the web view whenever the page changes `document.title`.
    page_title: Arc<Mutex<String>>,
}

impl HostedWindow {
    fn title(&self) -> String {
        let page_title = self
            .page_title
            .lock()
            .map(|title| title.clone())
            .unwrap_or_default();
        prompt_title(page_title, self.window.title())
    }
}

fn prompt_title(page_title: String, window_title: String) -> String {
    if page_title.trim().is_empty() {
        window_title
    } else {
        page_title
    }
}

/// Window table that outlives individual event-loop callbacks.
struct DesktopState {
    windows: HashMap<WindowId, HostedWindow>,
    tao_ids: HashMap<TaoWindowId, WindowId>,
    next_id: u64,
    ui_dir: PathBuf,
    modifiers: ModifiersState,
    quit_requested: bool,
}

impl DesktopState {
    fn new(ui_dir: PathBuf) -> Self {
        Self {
            windows: HashMap::new(),
            tao_ids: HashMap::new(),
            next_id: 0,
            ui_dir,
            modifiers: ModifiersState::default(),
            quit_requested: false,
        }
    }

    fn translate(
        &mut self,
        tao_id: TaoWindowId,
        event: WindowEvent<'_>,
    ) -> Option<HostEvent> {
        let window = *self.tao_ids.get(&tao_id)?;

        match event {
            WindowEvent::CloseRequested => Some(HostEvent::CloseRequested(window)),
            WindowEvent::Destroyed => Some(HostEvent::Destroyed(window)),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                let accelerator = accelerator(event.physical_key, self.modifiers)?;
                let role = self.windows.get(&window)?.menu?;
                let command = role.command_for(accelerator)?;
                Some(HostEvent::Menu { window, command })
            }
            _ => None,
        }
    }

    fn hosted(&self, window: WindowId) -> Result<&HostedWindow, HostError> {
        self.windows
            .get(&window)
            .ok_or(HostError::UnknownWindow(window))
    }

    fn web_view(&self, window: WindowId) -> Result<&WebView, HostError> {
        self.hosted(window)?.web_view.as_ref().ok_or_else(|| {
            HostError::WebView(format!("{} has no content loaded", window))
        })
    }

    fn content_url(&self, content: ContentRef) -> Result<String, HostError> {
        let path = self.ui_dir.join(content.file_name());
        let path = path.canonicalize().map_err(|err| {
            HostError::Content(format!("{}: {}", path.display(), err))
        })?;
        Ok(format!("file://{}", path.display()))
    }
}

/// Borrowed view of the desktop state for the duration of one event.
struct DesktopHost<'a> {
    state: &'a mut DesktopState,
    target: &'a Target,
    proxy: &'a Proxy,
}

impl DesktopHost<'_> {
    fn post(&self, event: HostEvent) -> Result<(), HostError> {
        self.proxy
            .send_event(event)
            .map_err(|_| HostError::EventLoopClosed)
    }
}

impl WindowHost for DesktopHost<'_> {
    fn create_window(
        &mut self,
        options: &WindowOptions,
    ) -> Result<WindowId, HostError> {
        let window = WindowBuilder::new()
            .with_title(&options.title)
            .with_visible(options.visible)
            .build(self.target)
            .map_err(|err| HostError::WindowBuild(err.to_string()))?;

        self.state.next_id += 1;
        let id = WindowId::new(self.state.next_id);

        self.state.tao_ids.insert(window.id(), id);
        self.state.windows.insert(
            id,
            HostedWindow {
                web_view: None,
                window,
                menu: None,
                page_title: Arc::new(Mutex::new(String::new())),
            },
        );

        trace!("built {} ({})", id, options.title);
        Ok(id)
    }

    fn load_content(
        &mut self,
        window: WindowId,
        content: ContentRef,
    ) -> Result<(), HostError> {
        let url = self.state.content_url(content)?;

        if let Ok(web_view) = self.state.web_view(window) {
            return web_view
                .load_url(&url)
                .map_err(|err| HostError::WebView(err.to_string()));
        }

        let ipc_proxy = self.proxy.clone();
        let load_proxy = self.proxy.clone();
        let page_title = Arc::clone(&self.state.hosted(window)?.page_title);

        let builder = WebViewBuilder::new()
            .with_url(&url)
            .with_devtools(true)
            .with_ipc_handler(move |request| {
                let body = request.body();
                match messages::parse_window_message(body) {
                    Ok(message) => forward(
                        &ipc_proxy,
                        HostEvent::Message {
                            sender: window,
                            message,
                        },
                    ),
                    Err(err) => error!("{}", err),
                }
            })
            .with_on_page_load_handler(move |event, url| {
                if matches!(event, PageLoadEvent::Finished) {
                    trace!("{} finished loading {}", window, url);
                    forward(&load_proxy, HostEvent::ReadyToShow(window));
                }
            })
            .with_document_title_changed_handler(move |title| {
                trace!("{} page title is now '{}'", window, title);
                if let Ok(mut current) = page_title.lock() {
                    *current = title;
                }
            });

        let hosted = self
            .state
            .windows
            .get_mut(&window)
            .ok_or(HostError::UnknownWindow(window))?;

        let web_view = builder
            .build(&hosted.window)
            .map_err(|err| HostError::WebView(err.to_string()))?;
        hosted.web_view = Some(web_view);

        debug!("{} loading {}", window, url);
        Ok(())
    }

    fn send(
        &mut self,
        window: WindowId,
        message: &OutboundMessage,
    ) -> Result<(), HostError> {
        if let OutboundMessage::TitleSet(title) = message {
            self.state.hosted(window)?.window.set_title(title);
        }

        let script = messages::to_window_script(message)?;
        self.state
            .web_view(window)?
            .evaluate_script(&script)
            .map_err(|err| HostError::WebView(err.to_string()))
    }

    fn show(&mut self, window: WindowId) -> Result<(), HostError> {
        let hosted = self.state.hosted(window)?;
        hosted.window.set_visible(true);
        hosted.window.set_focus();
        Ok(())
    }

    fn close(&mut self, window: WindowId) -> Result<(), HostError> {
        self.state.hosted(window)?;
        self.post(HostEvent::CloseRequested(window))
    }

    fn destroy(&mut self, window: WindowId) -> Result<(), HostError> {
        let hosted = self
            .state
            .windows
            .remove(&window)
            .ok_or(HostError::UnknownWindow(window))?;
        self.state.tao_ids.remove(&hosted.window.id());
        drop(hosted);
        trace!("dropped {}", window);
        Ok(())
    }

    fn open_dev_tools(&mut self, window: WindowId) -> Result<(), HostError> {
        self.state.web_view(window)?.open_devtools();
        Ok(())
    }

    fn title(&self, window: WindowId) -> Option<String> {
        self.state.windows.get(&window).map(HostedWindow::title)
    }

    fn install_menu(
        &mut self,
        window: WindowId,
        role: MenuRole,
    ) -> Result<(), HostError> {
        let hosted = self
            .state
            .windows
            .get_mut(&window)
            .ok_or(HostError::UnknownWindow(window))?;
        debug!("{} menu: {}", window, role.label());
        hosted.menu = Some(role);
        Ok(())
    }

    // rfd blocks the coordination thread until answered; the answer is
    // posted back so the close gate resolves through the normal event path.
    fn request_confirmation(
        &mut self,
        window: WindowId,
        prompt: &ConfirmPrompt,
    ) -> Result<(), HostError> {
        let hosted = self.state.hosted(window)?;

        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(&prompt.title)
            .set_description(format!("{}\n\n{}", prompt.message, prompt.detail))
            .set_buttons(MessageButtons::OkCancelCustom(
                prompt.confirm_label.clone(),
                prompt.cancel_label.clone(),
            ))
            .set_parent(&hosted.window)
            .show();

        let choice = match answer {
            MessageDialogResult::Custom(label) if label == prompt.confirm_label => {
                ConfirmChoice::Quit
            }
            MessageDialogResult::Ok | MessageDialogResult::Yes => {
                ConfirmChoice::Quit
            }
            _ => ConfirmChoice::Cancel,
        };

        self.post(HostEvent::ConfirmationResolved { window, choice })
    }

    fn dismiss_confirmation(&mut self, window: WindowId) {
        // The modal has already returned by the time any other message is
        // processed, so there is nothing on screen to take down.
        trace!("confirmation for {} dismissed", window);
    }

    fn show_about(&mut self, about: &AboutInfo) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(format!("About {}", about.name))
            .set_description(about.description())
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn quit(&mut self) {
        self.state.quit_requested = true;
    }
}

// Callbacks owned by a web view can outlive the event loop during shutdown.
fn forward(proxy: &Proxy, event: HostEvent) {
    if let Err(err) = proxy.send_event(event) {
        debug!("event loop gone, dropping {:?}", err.0);
    }
}

fn accelerator(code: KeyCode, modifiers: ModifiersState) -> Option<Accelerator> {
    let key = match code {
        KeyCode::KeyN => Key::Char('n'),
        KeyCode::KeyQ => Key::Char('q'),
        KeyCode::KeyW => Key::Char('w'),
        KeyCode::F1 => Key::F(1),
        KeyCode::F12 => Key::F(12),
        _ => return None,
    };

    Some(Accelerator {
        key,
        ctrl: modifiers.control_key() || modifiers.super_key(),
    })
}

/// Runs the tao event loop as the coordination thread. Never returns on
/// success; the process exits once the coordinator quits.
pub fn run(config: AppConfig) -> Result<(), Box<dyn Error>> {
    if !config.ui_dir.is_dir() {
        return Err(format!(
            "ui directory '{}' does not exist",
            config.ui_dir.display()
        )
        .into());
    }

    let event_loop = EventLoopBuilder::<HostEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();
    let mut state = DesktopState::new(config.ui_dir.clone());
    let mut coordinator = Coordinator::new(config);

    info!("starting event loop");
    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        let host_event = match event {
            Event::NewEvents(StartCause::Init) => Some(HostEvent::AppReady),
            Event::UserEvent(event) => Some(event),
            Event::WindowEvent {
                window_id, event, ..
            } => state.translate(window_id, event),
            _ => None,
        };

        if let Some(host_event) = host_event {
            let mut host = DesktopHost {
                state: &mut state,
                target,
                proxy: &proxy,
            };
            coordinator.handle(&mut host, host_event);
        }

        if state.quit_requested {
            *control_flow = ControlFlow::Exit;
        }
    })
}
