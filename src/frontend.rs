use js_sys::{Array, Function, Reflect};
use log::{debug, warn, Level};
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Storage,
};
use yew::prelude::*;

use crate::{
    content::{
        BRAND_LOGO, BRAND_NAME, CONTACT_CHANNELS, COPYRIGHT, FORM_ENDPOINT, JA_LOGO, PROJECTS,
        SERVICES, TECH_LOGOS,
    },
    preference::{PreferenceBackend, PreferenceStore, StorageError, Theme},
    sections::{RegionObserver, SectionId, BAND_ROOT_MARGIN, BAND_THRESHOLD},
    shell::PageController,
};

type Controller = PageController<Element, LocalStorageBackend>;

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn storage_rejection(err: JsValue) -> StorageError {
    StorageError::Rejected(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

struct LocalStorageBackend;

impl PreferenceBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage.get_item(key).map_err(storage_rejection)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(storage_rejection)
    }
}

fn intersection_batch(entries: &Array) -> Vec<(SectionId, bool)> {
    entries
        .iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
        .filter_map(|entry| {
            SectionId::from_str(&entry.target().id()).map(|id| (id, entry.is_intersecting()))
        })
        .collect()
}

/// `IntersectionObserver` watching the viewport midline. Owns its callback so
/// the closure lives exactly as long as the observer.
struct DomRegionObserver {
    inner: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl DomRegionObserver {
    fn new<F>(mut on_batch: F) -> Option<Self>
    where
        F: FnMut(Vec<(SectionId, bool)>) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                on_batch(intersection_batch(&entries));
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_root_margin(BAND_ROOT_MARGIN);
        options.set_threshold(&JsValue::from_f64(BAND_THRESHOLD));

        let inner =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .ok()?;

        Some(Self {
            inner,
            _callback: callback,
        })
    }
}

impl RegionObserver<Element> for DomRegionObserver {
    fn observe(&self, handle: &Element) {
        self.inner.observe(handle);
    }

    fn unobserve(&self, handle: &Element) {
        self.inner.unobserve(handle);
    }
}

impl Drop for DomRegionObserver {
    fn drop(&mut self) {
        self.inner.disconnect();
    }
}

fn apply_theme(theme: Theme) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));

    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

#[derive(Clone)]
struct SharedController(Rc<RefCell<Controller>>);

impl PartialEq for SharedController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
struct PageShellProps {
    controller: SharedController,
}

fn theme_icon(theme: Theme) -> Html {
    if theme.is_dark() {
        html! {
            <svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
                <circle cx="12" cy="12" r="5"></circle>
                <line x1="12" y1="1" x2="12" y2="3"></line>
                <line x1="12" y1="21" x2="12" y2="23"></line>
                <line x1="4.22" y1="4.22" x2="5.64" y2="5.64"></line>
                <line x1="18.36" y1="18.36" x2="19.78" y2="19.78"></line>
                <line x1="1" y1="12" x2="3" y2="12"></line>
                <line x1="21" y1="12" x2="23" y2="12"></line>
                <line x1="4.22" y1="19.78" x2="5.64" y2="18.36"></line>
                <line x1="18.36" y1="5.64" x2="19.78" y2="4.22"></line>
            </svg>
        }
    } else {
        html! {
            <svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
                <path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"></path>
            </svg>
        }
    }
}

fn logo_strip() -> Html {
    // Rendered twice so the CSS loop can wrap without a gap.
    TECH_LOGOS
        .iter()
        .chain(TECH_LOGOS.iter())
        .map(|(src, alt)| {
            html! {
                <div class="logo-item">
                    <img src={*src} alt={*alt} />
                </div>
            }
        })
        .collect()
}

#[function_component(PageShell)]
fn page_shell(props: &PageShellProps) -> Html {
    let redraw = use_force_update();
    let section_refs = use_memo((), |_| SectionId::ALL.map(|_| NodeRef::default()));

    {
        let controller = props.controller.clone();
        let section_refs = section_refs.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            apply_theme(controller.0.borrow().theme());

            let weak: Weak<RefCell<Controller>> = Rc::downgrade(&controller.0);
            let observer = DomRegionObserver::new(move |batch| {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                let changed = controller.borrow_mut().on_intersections(batch);
                if changed {
                    redraw.force_update();
                }
            })
            .map(|observer| Box::new(observer) as Box<dyn RegionObserver<Element>>);

            let regions = SectionId::ALL
                .into_iter()
                .zip(section_refs.iter())
                .map(|(id, node)| (id, node.cast::<Element>()));
            controller.0.borrow_mut().mount(observer, regions);

            if !controller.0.borrow().highlighting_enabled() {
                warn!("IntersectionObserver unavailable; navigation highlighting disabled");
            }

            move || {
                controller.0.borrow_mut().unmount();
            }
        });
    }

    let (active, theme, menu) = {
        let controller = props.controller.0.borrow();
        (controller.active_section(), controller.theme(), controller.menu())
    };

    let on_toggle_theme = {
        let controller = props.controller.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            let next = controller.0.borrow_mut().toggle_theme();
            apply_theme_with_transition(next);
            redraw.force_update();
        })
    };

    let on_toggle_menu = {
        let controller = props.controller.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            controller.0.borrow_mut().toggle_menu();
            redraw.force_update();
        })
    };

    let nav_links = SectionId::ALL
        .into_iter()
        .map(|id| {
            let onclick = {
                let controller = props.controller.clone();
                let redraw = redraw.clone();
                Callback::from(move |_: MouseEvent| {
                    let anchor = controller.0.borrow_mut().follow_nav_link(id);
                    debug!("following {anchor}");
                    redraw.force_update();
                })
            };

            html! {
                <a
                    href={id.anchor()}
                    class={classes!((active == id).then_some("active"))}
                    onclick={onclick}
                >
                    {id.nav_label()}
                </a>
            }
        })
        .collect::<Html>();

    let section_ref = |id: SectionId| section_refs[id as usize].clone();

    html! {
        <div class={theme.app_class()}>
            <header class="header">
                <div class="container">
                    <div class="logo-section">
                        <img src={BRAND_LOGO} alt="Nexorum Logo" class="logo" />
                        <span class="brand-name">{BRAND_NAME}</span>
                    </div>
                    <button class="hamburger" type="button" onclick={on_toggle_menu} aria-label="Toggle menu">
                        <span class={menu.bar_class()}></span>
                        <span class={menu.bar_class()}></span>
                        <span class={menu.bar_class()}></span>
                    </button>
                    <nav class={menu.nav_class()}>
                        {nav_links}
                        <button
                            class="theme-toggle"
                            type="button"
                            aria-label={theme.toggle_label()}
                            aria-pressed={theme.pressed().to_string()}
                            onclick={on_toggle_theme}
                        >
                            {theme_icon(theme)}
                        </button>
                    </nav>
                </div>
            </header>

            <section class="hero" id={SectionId::Home.as_str()} ref={section_ref(SectionId::Home)}>
                <div class="container">
                    <div class="hero-content">
                        <h1 class="hero-title">
                            {"Vytváříme "}<span class="gradient-text">{"digitální budoucnost"}</span>
                        </h1>
                        <p class="hero-subtitle">
                            {"Jsme mladá česká JA Czech firma zaměřená na tvorbu moderních webových stránek a sociálních sítí"}
                        </p>
                        <div class="hero-buttons">
                            <a href={SectionId::Projects.anchor()} class="btn btn-primary">{"Naše projekty"}</a>
                            <a href={SectionId::Contact.anchor()} class="btn btn-secondary">{"Kontaktujte nás"}</a>
                        </div>
                    </div>
                    <div class="hero-illustration" aria-hidden="true">
                        <div class="blob blob-1"></div>
                        <div class="blob blob-2"></div>
                        <div class="blob blob-3"></div>
                    </div>
                </div>
            </section>

            <section class="about" id={SectionId::About.as_str()} ref={section_ref(SectionId::About)}>
                <div class="container">
                    <h2 class="section-title">{"Co děláme"}</h2>
                    <div class="about-grid">
                        { for SERVICES.iter().map(|service| html! {
                            <div class="about-card">
                                <div class="card-icon">{service.icon}</div>
                                <h3>{service.title}</h3>
                                <p>{service.body}</p>
                            </div>
                        }) }
                    </div>
                </div>
            </section>

            <section class="ja-section" id={SectionId::Ja.as_str()} ref={section_ref(SectionId::Ja)}>
                <div class="container">
                    <h2 class="section-title">{"Junior Achievement"}</h2>
                    <div class="ja-content">
                        <div class="ja-badge">
                            <img src={JA_LOGO} alt="JA Czech" class="ja-logo" />
                        </div>
                        <h3 class="ja-subtitle">{"Fiktivní studentská firma"}</h3>
                        <p class="ja-description">
                            {"Nexorum je fiktivní firma vytvořená v rámci vzdělávacího programu "}
                            <strong>{"Junior Achievement"}</strong>
                            {", který studentům umožňuje získat praktické zkušenosti s podnikáním, týmovou prací a realizací skutečných projektů."}
                        </p>
                        <p class="ja-description">
                            {"Naším cílem je získat reálné dovednosti ve vývoji webu, projektovém řízení a komunikaci s klienty v bezpečném a podporujícím vzdělávacím prostředí."}
                        </p>
                    </div>
                </div>
            </section>

            <section class="projects" id={SectionId::Projects.as_str()} ref={section_ref(SectionId::Projects)}>
                <div class="container">
                    <h2 class="section-title">{"Naše Projekty"}</h2>
                    <p class="section-subtitle">{"Ukázka našich realizovaných webových řešení"}</p>
                    <div class="projects-grid">
                        { for PROJECTS.iter().map(|project| html! {
                            <div key={project.title} class="project-card">
                                <div class="project-icon">{project.icon}</div>
                                <h3>{project.title}</h3>
                                <p>{project.description}</p>
                                <div class="tech-stack">
                                    { for project.tech.iter().map(|tech| html! {
                                        <span key={*tech} class="tech-badge">{*tech}</span>
                                    }) }
                                </div>
                            </div>
                        }) }
                    </div>

                    <div class="logo-loop">
                        <div class="logo-loop-container">
                            <div class="logo-track">
                                {logo_strip()}
                            </div>
                        </div>
                    </div>
                </div>
            </section>

            <section class="contact" id={SectionId::Contact.as_str()} ref={section_ref(SectionId::Contact)}>
                <div class="container">
                    <h2 class="section-title">{"Kontaktujte nás"}</h2>
                    <p class="section-subtitle">{"Máte projekt? Ozvěte se nám!"}</p>
                    <div class="contact-grid">
                        <div class="contact-info">
                            { for CONTACT_CHANNELS.iter().map(|channel| html! {
                                <div class="contact-item">
                                    <div class="contact-icon">{channel.icon}</div>
                                    <div>
                                        <h4>{channel.heading}</h4>
                                        if channel.external {
                                            <a href={channel.href} target="_blank" rel="noopener noreferrer">{channel.label}</a>
                                        } else {
                                            <a href={channel.href}>{channel.label}</a>
                                        }
                                    </div>
                                </div>
                            }) }
                        </div>
                        <div class="contact-form">
                            <form action={FORM_ENDPOINT} method="POST">
                                <input type="text" name="Jméno" placeholder="Vaše jméno" class="form-input" required={true} />
                                <input type="email" name="E-mail" placeholder="Váš email" class="form-input" required={true} />
                                <textarea name="Zpráva" placeholder="Vaše zpráva" rows="5" class="form-input" required={true} />
                                <button type="submit" class="btn btn-primary">{"Odeslat zprávu"}</button>
                            </form>
                        </div>
                    </div>
                </div>
            </section>

            <footer class="footer">
                <div class="container">
                    <div class="footer-content">
                        <div class="footer-brand">
                            <img src={BRAND_LOGO} alt="Nexorum Logo" class="footer-logo" />
                            <span class="brand-name">{BRAND_NAME}</span>
                        </div>
                        <p>{COPYRIGHT}</p>
                    </div>
                </div>
            </footer>
        </div>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(level);

    let preferences = PreferenceStore::load(LocalStorageBackend);
    let controller = SharedController(Rc::new(RefCell::new(PageController::new(preferences))));

    yew::Renderer::<PageShell>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        PageShellProps { controller },
    )
    .render();
}
