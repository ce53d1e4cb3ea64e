//! Browser binding over `web-sys`.
//!
//! - `LocalStorage`: preferences in `window.localStorage`
//! - `DocumentSurface`: `data-theme` / `data-default-theme` on `<html>`, font
//!   CSS variables, toast notifications
//! - `InputControl`: elements carrying `data-theme-value` or `data-font-value`
//!
//! [`mount`] wires all of them to one reconciler and listens to user input and
//! to the `prefers-color-scheme` media query.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use anyhow::anyhow;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, MediaQueryListEvent, Storage, Window};

use crate::reconciler::{Reconciler, ReconcilerOptions, SubscriptionId};
use crate::state::{FontStack, FontType, Theme};
use crate::store::PreferenceStore;
use crate::surface::{Binding, Control, Surface};

const THEME_ATTRIBUTE: &str = "data-theme";
const DEFAULT_THEME_ATTRIBUTE: &str = "data-default-theme";
const THEME_VALUE_ATTRIBUTE: &str = "data-theme-value";
const FONT_VALUE_ATTRIBUTE: &str = "data-font-value";
const ACTIVE_CLASS: &str = "btn-active";
const TOAST_MILLIS: i32 = 3000;

pub type WebReconciler = Reconciler<LocalStorage, DocumentSurface>;

fn warn(context: &str, error: &JsValue) {
    web_sys::console::warn_2(&JsValue::from_str(context), error);
}

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn new(window: &Window) -> Result<Self, JsValue> {
        let storage = window.local_storage()?.ok_or("No localStorage")?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            warn("localStorage.setItem failed", &e);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            warn("localStorage.removeItem failed", &e);
        }
    }
}

pub struct DocumentSurface {
    window: Window,
    document: Document,
    root: Element,
}

impl DocumentSurface {
    pub fn new(window: Window) -> Result<Self, JsValue> {
        let document = window.document().ok_or("No document")?;
        let root = document.document_element().ok_or("No document element")?;
        Ok(Self {
            window,
            document,
            root,
        })
    }

    fn show_toast(&self, message: &str) -> Result<(), JsValue> {
        let body = self.document.body().ok_or("No body")?;
        let toast = self.document.create_element("div")?;
        toast.set_class_name("toast toast-top toast-center");
        let alert = self.document.create_element("div")?;
        alert.set_class_name("alert alert-info");
        alert.set_text_content(Some(message));
        toast.append_child(&alert)?;
        body.append_child(&toast)?;

        let dismiss = Closure::once_into_js(move || toast.remove());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                dismiss.unchecked_ref(),
                TOAST_MILLIS,
            )?;
        Ok(())
    }
}

impl Surface for DocumentSurface {
    fn theme_attribute(&self) -> Option<String> {
        self.root.get_attribute(THEME_ATTRIBUTE)
    }

    fn default_theme_attribute(&self) -> Option<String> {
        self.root.get_attribute(DEFAULT_THEME_ATTRIBUTE)
    }

    fn apply_theme(&mut self, theme: &Theme) {
        if let Err(e) = self.root.set_attribute(THEME_ATTRIBUTE, theme.as_str()) {
            warn("Failed to set data-theme", &e);
        }
    }

    fn apply_fonts(&mut self, fonts: &FontStack) {
        let Some(root) = self.root.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = root.style();
        for (name, value) in fonts.css_variables() {
            if let Err(e) = style.set_property(name, value) {
                warn("Failed to set font variable", &e);
            }
        }
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = self.show_toast(message) {
            warn("Failed to show notification", &e);
        }
    }
}

#[derive(Clone)]
pub struct InputControl {
    element: Element,
    binding: Binding,
}

impl InputControl {
    /// Reads the binding from the element's data attributes.
    pub fn from_element(element: Element) -> Option<Self> {
        let binding = if let Some(value) = element.get_attribute(THEME_VALUE_ATTRIBUTE) {
            Binding::Theme(Theme::new(&value).ok()?)
        } else {
            let value = element.get_attribute(FONT_VALUE_ATTRIBUTE)?;
            Binding::Font(value.parse::<FontType>().ok()?)
        };
        Some(Self { element, binding })
    }

    /// All bindable controls currently in the document.
    pub fn discover(document: &Document) -> Result<Vec<Self>, JsValue> {
        let selector = format!("[{THEME_VALUE_ATTRIBUTE}],[{FONT_VALUE_ATTRIBUTE}]");
        let nodes = document.query_selector_all(&selector)?;
        let mut controls = Vec::new();
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            if let Some(control) = Self::from_element(element) {
                controls.push(control);
            }
        }
        Ok(controls)
    }

    fn as_input(&self) -> Option<&HtmlInputElement> {
        self.element.dyn_ref::<HtmlInputElement>()
    }

    /// Inputs report through `change`, buttons through `click`.
    fn event_name(&self) -> &'static str {
        if self.as_input().is_some() {
            "change"
        } else {
            "click"
        }
    }
}

impl Control for InputControl {
    fn binding(&self) -> Binding {
        self.binding.clone()
    }

    fn set_active(&mut self, active: bool) {
        if let Some(input) = self.as_input() {
            input.set_checked(active);
            return;
        }
        if let Err(e) = self
            .element
            .class_list()
            .toggle_with_force(ACTIVE_CLASS, active)
        {
            warn("Failed to toggle active class", &e);
        }
        let _ = self
            .element
            .set_attribute("aria-pressed", if active { "true" } else { "false" });
    }

    fn set_enabled(&mut self, enabled: bool) {
        if let Some(input) = self.as_input() {
            input.set_disabled(!enabled);
            return;
        }
        let result = if enabled {
            self.element.remove_attribute("disabled")
        } else {
            self.element.set_attribute("disabled", "")
        };
        if let Err(e) = result {
            warn("Failed to toggle disabled", &e);
        }
    }
}

/// Builds the page's reconciler, binds every control found in the document,
/// and starts listening to user input and color scheme changes.
pub fn mount(options: ReconcilerOptions) -> Result<Rc<RefCell<WebReconciler>>, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let store = LocalStorage::new(&window)?;
    let surface = DocumentSurface::new(window.clone())?;
    let document = surface.document.clone();
    let reconciler = Rc::new(RefCell::new(Reconciler::new(store, surface, options)));

    for control in InputControl::discover(&document)? {
        listen_control(&reconciler, &control)?;
        reconciler.borrow_mut().bind_control(Box::new(control));
    }
    listen_color_scheme(&window, &reconciler)?;
    Ok(reconciler)
}

/// Handle returned to the page script by [`start`].
#[wasm_bindgen]
pub struct ThemeHandle {
    reconciler: Rc<RefCell<WebReconciler>>,
}

#[wasm_bindgen]
impl ThemeHandle {
    /// Binds a control inserted after [`start`], e.g. by a dialog.
    #[wasm_bindgen(js_name = bindControl)]
    pub fn bind_control(&self, element: Element) -> Result<bool, JsValue> {
        bind_element(&self.reconciler, element)
    }

    /// Same as clicking a theme control. `false` while a theme is enforced.
    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, theme: &str) -> Result<bool, JsValue> {
        let theme = Theme::new(theme).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.borrow_mut()?.set_theme(theme))
    }

    #[wasm_bindgen(js_name = setFont)]
    pub fn set_font(&self, font_type: &str) -> Result<bool, JsValue> {
        let font_type = font_type
            .parse::<FontType>()
            .map_err(|_| JsValue::from_str(&format!("invalid font type: {font_type:?}")))?;
        Ok(self.borrow_mut()?.set_font(font_type))
    }

    /// Shows `theme` without persisting it and disables theme controls.
    #[wasm_bindgen(js_name = enforceTheme)]
    pub fn enforce_theme(&self, theme: &str, message: Option<String>) -> Result<(), JsValue> {
        let theme = Theme::new(theme).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.borrow_mut()?.enforce_theme(theme, message.as_deref());
        Ok(())
    }

    #[wasm_bindgen(js_name = clearEnforcedTheme)]
    pub fn clear_enforced_theme(&self) -> Result<(), JsValue> {
        self.borrow_mut()?.clear_enforced_theme();
        Ok(())
    }

    pub fn theme(&self) -> Result<String, JsValue> {
        Ok(self.borrow()?.theme().to_string())
    }

    #[wasm_bindgen(js_name = fontType)]
    pub fn font_type(&self) -> Result<String, JsValue> {
        Ok(self.borrow()?.font_type().to_string())
    }

    /// Calls `callback(kind, value)` after each change, `kind` being
    /// `"theme"` or `"font"`. An exception thrown by the callback is logged
    /// and does not affect the change or other subscribers.
    pub fn subscribe(&self, callback: js_sys::Function) -> Result<u32, JsValue> {
        let id = self.borrow_mut()?.subscribe(move |kind, value| {
            callback
                .call2(&JsValue::NULL, &JsValue::from_str(kind.as_str()), &JsValue::from_str(value))
                .map(|_| ())
                .map_err(|e| anyhow!("{e:?}"))
        });
        u32::try_from(id.value()).map_err(|_| JsValue::from_str("Too many subscriptions"))
    }

    pub fn unsubscribe(&self, id: u32) -> Result<bool, JsValue> {
        Ok(self.borrow_mut()?.unsubscribe(SubscriptionId::from(u64::from(id))))
    }
}

impl ThemeHandle {
    fn borrow(&self) -> Result<Ref<'_, WebReconciler>, JsValue> {
        self.reconciler.try_borrow().map_err(|_| busy())
    }

    fn borrow_mut(&self) -> Result<RefMut<'_, WebReconciler>, JsValue> {
        self.reconciler.try_borrow_mut().map_err(|_| busy())
    }
}

fn busy() -> JsValue {
    JsValue::from_str("Theme preferences are busy")
}

/// Entry point called by the page script.
#[wasm_bindgen]
pub fn start() -> Result<ThemeHandle, JsValue> {
    Ok(ThemeHandle {
        reconciler: mount(ReconcilerOptions::default())?,
    })
}

/// Binds a control rendered after [`mount`].
pub fn bind_element(reconciler: &Rc<RefCell<WebReconciler>>, element: Element) -> Result<bool, JsValue> {
    let Some(control) = InputControl::from_element(element) else {
        return Ok(false);
    };
    listen_control(reconciler, &control)?;
    reconciler.borrow_mut().bind_control(Box::new(control));
    Ok(true)
}

fn listen_control(reconciler: &Rc<RefCell<WebReconciler>>, control: &InputControl) -> Result<(), JsValue> {
    let weak = Rc::downgrade(reconciler);
    let binding = control.binding.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let Some(reconciler) = weak.upgrade() else {
            return;
        };
        let Ok(mut reconciler) = reconciler.try_borrow_mut() else {
            return;
        };
        match &binding {
            Binding::Theme(theme) => {
                if !reconciler.set_theme(theme.clone()) {
                    // Enforced: put the control back where the state says.
                    reconciler.render();
                }
            }
            Binding::Font(font_type) => {
                reconciler.set_font(*font_type);
            }
        }
    });
    control
        .element
        .add_event_listener_with_callback(control.event_name(), handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn listen_color_scheme(window: &Window, reconciler: &Rc<RefCell<WebReconciler>>) -> Result<(), JsValue> {
    let Some(query) = window.match_media("(prefers-color-scheme: dark)")? else {
        return Ok(());
    };
    let weak = Rc::downgrade(reconciler);
    let handler = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |event: MediaQueryListEvent| {
        if let Some(reconciler) = weak.upgrade() {
            if let Ok(mut reconciler) = reconciler.try_borrow_mut() {
                reconciler.color_scheme_changed(event.matches());
            }
        }
    });
    query.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
