use crate::browser::{self, EventListener, RevealObserver, HEADER_ID};
use crate::clipboard::{self, icon_glyph, CopyFeedback};
use crate::config::LandingConfig;
use crate::logging::{self, log_event, LogLevel};
use crate::navigation::{header_is_scrolled, MenuAction, MenuState};
use crate::particles;
use crate::reveal::{RevealKind, RevealOptions, RevealState};
use crate::scrolling::{active_section, back_to_top_visible, nav_link_is_active};
use crate::toast;
use gloo_timers::callback::Timeout;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Element, Event, MouseEvent, Node};
use yew::prelude::*;

const NAV_LINKS: &[(&str, &str)] = &[
    ("#home", "Inicio"),
    ("#about", "El evento"),
    ("#benefits", "Beneficios"),
    ("#schedule", "Programa"),
    ("#pricing", "Precios"),
    ("#payment", "Pago"),
    ("#contact", "Contacto"),
];
const COPY_ICON: &str = "fas fa-copy";

impl Reducible for MenuState {
    type Action = MenuAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[hook]
fn use_landing_config() -> LandingConfig {
    use_context::<LandingConfig>().unwrap_or_default()
}

/// Tracks `past(scrollY, threshold)` and re-renders only when it flips.
#[hook]
fn use_scroll_flag(threshold: f64, past: fn(f64, f64) -> bool) -> bool {
    let flag = use_state_eq(|| past(browser::scroll_y(), threshold));

    {
        let flag = flag.clone();
        use_effect_with(threshold, move |threshold| {
            let threshold = *threshold;
            flag.set(past(browser::scroll_y(), threshold));
            let listener = window().and_then(|win| {
                EventListener::new(&win, "scroll", move |_| {
                    flag.set(past(browser::scroll_y(), threshold));
                })
            });
            move || drop(listener)
        });
    }

    *flag
}

/// Id of the section under the highlight line, recomputed from fresh
/// layout on mount and on every scroll event.
#[hook]
fn use_active_section(lookahead: f64) -> Option<String> {
    let active = use_state_eq(|| None::<String>);

    {
        let active = active.clone();
        use_effect_with(lookahead, move |lookahead| {
            let lookahead = *lookahead;
            let highlight = move || {
                let sections = browser::section_bounds();
                let current = active_section(&sections, browser::scroll_y(), lookahead);
                active.set(current.map(str::to_string));
            };
            highlight();

            let listener = window().and_then(|win| EventListener::new(&win, "scroll", move |_| highlight()));
            move || drop(listener)
        });
    }

    (*active).clone()
}

fn anchor_click(href: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        browser::scroll_to_anchor(href);
    })
}

#[function_component(NavBar)]
fn nav_bar() -> Html {
    let config = use_landing_config();
    let menu = use_reducer_eq(MenuState::closed);
    let scrolled = use_scroll_flag(config.header_threshold, header_is_scrolled);
    let active = use_active_section(config.highlight_lookahead);
    let menu_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    use_effect_with(menu.scroll_locked(), |locked| {
        browser::set_body_scroll_lock(*locked);
        || ()
    });

    {
        let dispatcher = menu.dispatcher();
        let menu_ref = menu_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with((), move |_| {
            let listener = window().and_then(|w| w.document()).and_then(|document| {
                EventListener::new(&document, "click", move |event: Event| {
                    let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
                    let contains = |node_ref: &NodeRef| {
                        node_ref
                            .get()
                            .map(|node| node.contains(target.as_ref()))
                            .unwrap_or(false)
                    };
                    dispatcher.dispatch(MenuAction::DocumentClick {
                        inside_menu: contains(&menu_ref),
                        inside_toggle: contains(&toggle_ref),
                    });
                })
            });
            move || drop(listener)
        });
    }

    let on_toggle = {
        let dispatcher = menu.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(MenuAction::Toggle))
    };

    let links = NAV_LINKS.iter().map(|&(href, label)| {
        let dispatcher = menu.dispatcher();
        let onclick = Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            dispatcher.dispatch(MenuAction::LinkClick);
            browser::scroll_to_anchor(href);
        });
        let is_active = nav_link_is_active(href, active.as_deref());

        html! {
            <li>
                <a href={href} class={classes!("nav-link", is_active.then_some("active"))} onclick={onclick}>
                    {label}
                </a>
            </li>
        }
    });

    html! {
        <header id={HEADER_ID} class={classes!("navbar", scrolled.then_some("scrolled"))}>
            <div class="nav-container">
                <a href="#home" class="nav-logo" onclick={anchor_click("#home")}>
                    {"FILTRO "}<span>{"FINAL"}</span>
                </a>
                <ul id="navMenu" ref={menu_ref} class={classes!("nav-menu", menu.active_class())}>
                    { for links }
                </ul>
                <button
                    id="navToggle"
                    ref={toggle_ref}
                    type="button"
                    class={classes!("nav-toggle", menu.active_class())}
                    aria-label="Abrir menú"
                    aria-expanded={menu.is_open().to_string()}
                    onclick={on_toggle}
                >
                    <span class="bar"></span>
                    <span class="bar"></span>
                    <span class="bar"></span>
                </button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct RevealProps {
    #[prop_or_default]
    kind: RevealKind,
    #[prop_or_default]
    delay_ms: Option<u32>,
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    children: Children,
}

/// The page-wide reveal observer; `None` when intersection events are
/// unavailable and candidates render revealed.
#[derive(Clone)]
struct RevealContext(Option<Rc<RevealObserver>>);

impl PartialEq for RevealContext {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(left), Some(right)) => Rc::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Wraps content that fades in the first time it scrolls into view.
#[function_component(Reveal)]
fn reveal(props: &RevealProps) -> Html {
    let observer = use_context::<RevealContext>().and_then(|context| context.0);
    let node_ref = use_node_ref();
    let state = use_state_eq(|| RevealState::initial(observer.is_some()));

    {
        let state = state.clone();
        let node_ref = node_ref.clone();
        let options = RevealOptions::new(props.delay_ms);
        use_effect_with(RevealContext(observer), move |context| {
            let registration = match &context.0 {
                Some(observer) if !state.is_revealed() => {
                    let registration = node_ref.cast::<Element>().and_then(|element| {
                        let state = state.clone();
                        observer.observe(&element, options, move |next| state.set(next))
                    });
                    if registration.is_none() {
                        state.set(RevealState::Revealed { delay_ms: None });
                    }
                    registration
                }
                _ => None,
            };
            move || drop(registration)
        });
    }

    html! {
        <div
            ref={node_ref}
            class={classes!(props.class.clone(), state.class())}
            data-aos={props.kind.as_str()}
            style={state.style().map(AttrValue::from)}
        >
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CopyFieldProps {
    label: AttrValue,
    value: AttrValue,
    #[prop_or_default]
    icon: Option<AttrValue>,
}

#[function_component(CopyField)]
fn copy_field(props: &CopyFieldProps) -> Html {
    let config = use_landing_config();
    let copied = use_state_eq(|| false);
    let restore_timer = use_mut_ref(|| None::<Timeout>);

    let onclick = {
        let copied = copied.clone();
        let restore_timer = restore_timer.clone();
        let value = props.value.clone();
        let has_icon = props.icon.is_some();
        let feedback_ms = config.feedback_ms;
        let message = config.toast_message.clone();
        Callback::from(move |_: MouseEvent| {
            let copied = copied.clone();
            let restore_timer = restore_timer.clone();
            let value = value.clone();
            let message = message.clone();
            spawn_local(async move {
                let result = clipboard::copy_text(&value).await;
                match &result {
                    Ok(path) => log_event(LogLevel::Info, "clipboard_copied", json!({ "path": path })),
                    Err(err) => log_event(
                        LogLevel::Error,
                        "clipboard_copy_failed",
                        json!({ "error": err.as_str() }),
                    ),
                }

                let feedback = CopyFeedback::on_result(&result, has_icon);
                if feedback.copied {
                    copied.set(true);
                }
                if feedback.schedule_restore {
                    let copied = copied.clone();
                    *restore_timer.borrow_mut() = Some(Timeout::new(feedback_ms, move || copied.set(false)));
                }
                if feedback.notify {
                    toast::notify(&message);
                }
            });
        })
    };

    let icon = props.icon.as_ref().map(|icon| {
        let glyph = icon_glyph(*copied, icon).to_string();
        html! {
            <button class="copy-btn" type="button" aria-label={format!("Copiar {}", props.label)}>
                <i class={glyph}></i>
            </button>
        }
    });

    html! {
        <div class={classes!("copy-field", copied.then_some("copied"))} onclick={onclick}>
            <div class="copy-text">
                <span class="copy-label">{props.label.clone()}</span>
                <span class="copy-value">{props.value.clone()}</span>
            </div>
            { for icon }
        </div>
    }
}

#[function_component(BackToTop)]
fn back_to_top() -> Html {
    let config = use_landing_config();
    let visible = use_scroll_flag(config.back_to_top_threshold, back_to_top_visible);
    let onclick = Callback::from(|_: MouseEvent| browser::smooth_scroll_to(0.0));

    html! {
        <button
            id="backToTop"
            type="button"
            class={classes!("back-to-top", visible.then_some("visible"))}
            aria-label="Volver arriba"
            onclick={onclick}
        >
            <i class="fas fa-arrow-up"></i>
        </button>
    }
}

#[function_component(Particles)]
fn particle_field() -> Html {
    let config = use_landing_config();
    let particles = use_state(|| particles::generate(&mut fastrand::Rng::new(), config.particle_count));

    html! {
        <div id="particles" class="particles" aria-hidden="true">
            { for particles.iter().map(|particle| html! {
                <div class="particle" style={particle.style()}></div>
            }) }
        </div>
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    html! {
        <section id="home" class="hero">
            <Particles />
            <div class="hero-content">
                <Reveal kind={RevealKind::FadeDown} class={classes!("hero-badge")}>
                    {"Evento profesional de scouting"}
                </Reveal>
                <Reveal kind={RevealKind::FadeUp} delay_ms={Some(100)}>
                    <h1 class="hero-title">{"FILTRO "}<span>{"FINAL"}</span></h1>
                </Reveal>
                <Reveal kind={RevealKind::FadeUp} delay_ms={Some(200)}>
                    <p class="hero-subtitle">
                        {"Una jornada para jugadores que quieren ser vistos por ojeadores, agentes y clubes."}
                    </p>
                </Reveal>
                <Reveal kind={RevealKind::ZoomIn} delay_ms={Some(300)} class={classes!("hero-cta")}>
                    <a href="#pricing" class="btn btn-primary" onclick={anchor_click("#pricing")}>
                        {"Reserva tu plaza"}
                    </a>
                    <a href="#about" class="btn btn-secondary" onclick={anchor_click("#about")}>
                        {"Más información"}
                    </a>
                </Reveal>
            </div>
        </section>
    }
}

#[function_component(About)]
fn about() -> Html {
    html! {
        <section id="about" class="section about">
            <div class="container">
                <Reveal kind={RevealKind::FadeRight} class={classes!("section-header")}>
                    <h2>{"El evento"}</h2>
                    <p>{"Partidos reales, evaluación individual y un informe profesional de cada jugador."}</p>
                </Reveal>
                <div class="about-grid">
                    <Reveal kind={RevealKind::FadeRight} class={classes!("about-text")}>
                        <p>
                            {"FILTRO FINAL reúne a jugadores de todas las categorías en una jornada "}
                            {"diseñada para competir ante profesionales del fútbol."}
                        </p>
                        <p>
                            {"Cada participante es observado durante los partidos y recibe una "}
                            {"valoración con sus fortalezas y puntos de mejora."}
                        </p>
                    </Reveal>
                    <Reveal kind={RevealKind::FadeLeft} class={classes!("about-stats")}>
                        <div class="stat"><strong>{"12"}</strong><span>{"ojeadores"}</span></div>
                        <div class="stat"><strong>{"8"}</strong><span>{"partidos"}</span></div>
                        <div class="stat"><strong>{"1"}</strong><span>{"informe por jugador"}</span></div>
                    </Reveal>
                </div>
            </div>
        </section>
    }
}

const BENEFITS: &[(&str, &str, &str)] = &[
    ("fas fa-eye", "Visibilidad", "Juega delante de ojeadores de clubes y agencias."),
    ("fas fa-clipboard-list", "Informe técnico", "Recibe una evaluación escrita de tu rendimiento."),
    ("fas fa-video", "Vídeo del partido", "Material grabado para tu portfolio deportivo."),
    ("fas fa-handshake", "Contactos", "Conoce a profesionales que buscan talento."),
];

#[function_component(Benefits)]
fn benefits() -> Html {
    let cards = BENEFITS.iter().enumerate().map(|(index, &(icon, title, text))| {
        html! {
            <Reveal kind={RevealKind::FadeUp} delay_ms={Some(index as u32 * 100)} class={classes!("benefit-card")}>
                <i class={icon}></i>
                <h3>{title}</h3>
                <p>{text}</p>
            </Reveal>
        }
    });

    html! {
        <section id="benefits" class="section benefits">
            <div class="container">
                <Reveal kind={RevealKind::FadeUp} class={classes!("section-header")}>
                    <h2>{"Beneficios"}</h2>
                </Reveal>
                <div class="benefits-grid">
                    { for cards }
                </div>
            </div>
        </section>
    }
}

const SCHEDULE: &[(&str, &str)] = &[
    ("09:00", "Acreditación y calentamiento"),
    ("10:00", "Pruebas físicas y técnicas"),
    ("12:00", "Partidos de evaluación"),
    ("16:00", "Partido final"),
    ("18:00", "Entrega de informes"),
];

#[function_component(Schedule)]
fn schedule() -> Html {
    let items = SCHEDULE.iter().enumerate().map(|(index, &(time, title))| {
        let kind = if index % 2 == 0 { RevealKind::FadeRight } else { RevealKind::FadeLeft };
        html! {
            <Reveal kind={kind} delay_ms={Some(index as u32 * 100)} class={classes!("timeline-item")}>
                <span class="timeline-time">{time}</span>
                <span class="timeline-title">{title}</span>
            </Reveal>
        }
    });

    html! {
        <section id="schedule" class="section schedule">
            <div class="container">
                <Reveal kind={RevealKind::FadeUp} class={classes!("section-header")}>
                    <h2>{"Programa"}</h2>
                </Reveal>
                <div class="timeline">
                    { for items }
                </div>
            </div>
        </section>
    }
}

const PLANS: &[(&str, &str, &[&str], bool)] = &[
    ("Jugador", "45 €", &["Participación en partidos", "Informe técnico"], false),
    (
        "Jugador Pro",
        "75 €",
        &["Participación en partidos", "Informe técnico", "Vídeo individual"],
        true,
    ),
    ("Acompañante", "10 €", &["Acceso a grada", "Zona de familias"], false),
];

#[function_component(Pricing)]
fn pricing() -> Html {
    let cards = PLANS.iter().enumerate().map(|(index, &(name, price, features, featured))| {
        html! {
            <Reveal
                kind={RevealKind::ZoomIn}
                delay_ms={Some(index as u32 * 100)}
                class={classes!("pricing-card", featured.then_some("featured"))}
            >
                <h3>{name}</h3>
                <p class="price">{price}</p>
                <ul>
                    { for features.iter().map(|feature| html! { <li><i class="fas fa-check"></i>{*feature}</li> }) }
                </ul>
                <a href="#payment" class="btn btn-primary" onclick={anchor_click("#payment")}>
                    {"Inscribirme"}
                </a>
            </Reveal>
        }
    });

    html! {
        <section id="pricing" class="section pricing">
            <div class="container">
                <Reveal kind={RevealKind::FadeUp} class={classes!("section-header")}>
                    <h2>{"Precios"}</h2>
                </Reveal>
                <div class="pricing-grid">
                    { for cards }
                </div>
            </div>
        </section>
    }
}

#[function_component(Payment)]
fn payment() -> Html {
    html! {
        <section id="payment" class="section payment">
            <div class="container">
                <Reveal kind={RevealKind::FadeUp} class={classes!("section-header")}>
                    <h2>{"Pago"}</h2>
                    <p>{"Haz la transferencia e indica tu nombre completo en el concepto."}</p>
                </Reveal>
                <Reveal kind={RevealKind::FadeUp} delay_ms={Some(100)} class={classes!("payment-card")}>
                    <CopyField label="IBAN" value="ES91 2100 0418 4502 0005 1332" icon={COPY_ICON} />
                    <CopyField label="Bizum" value="600 123 456" icon={COPY_ICON} />
                    <CopyField label="Concepto" value="FILTRO FINAL" />
                </Reveal>
            </div>
        </section>
    }
}

#[function_component(Contact)]
fn contact() -> Html {
    html! {
        <section id="contact" class="section contact">
            <div class="container">
                <Reveal kind={RevealKind::FadeUp} class={classes!("section-header")}>
                    <h2>{"Contacto"}</h2>
                </Reveal>
                <Reveal kind={RevealKind::FadeUp} delay_ms={Some(100)} class={classes!("contact-links")}>
                    <a href="mailto:info@filtrofinal.es" class="contact-link">
                        <i class="fas fa-envelope"></i>{"info@filtrofinal.es"}
                    </a>
                    <a href="https://wa.me/34600123456" class="contact-link" target="_blank" rel="noopener noreferrer">
                        <i class="fab fa-whatsapp"></i>{"WhatsApp"}
                    </a>
                    <a href="https://instagram.com/filtrofinal" class="contact-link" target="_blank" rel="noopener noreferrer">
                        <i class="fab fa-instagram"></i>{"@filtrofinal"}
                    </a>
                </Reveal>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: LandingConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let reveal = use_memo(props.config.reveal_threshold, |threshold| {
        let observer = RevealObserver::new(*threshold).map(Rc::new);
        if observer.is_none() {
            log_event(LogLevel::Info, "reveal_fallback_enabled", json!({}));
        }
        RevealContext(observer)
    });

    html! {
        <ContextProvider<LandingConfig> context={props.config.clone()}>
        <ContextProvider<RevealContext> context={(*reveal).clone()}>
            <NavBar />
            <main>
                <Hero />
                <About />
                <Benefits />
                <Schedule />
                <Pricing />
                <Payment />
                <Contact />
            </main>
            <footer class="footer">
                <p>{"© FILTRO FINAL"}</p>
                <a href="#home" onclick={anchor_click("#home")}>{"Volver al inicio"}</a>
            </footer>
            <BackToTop />
        </ContextProvider<RevealContext>>
        </ContextProvider<LandingConfig>>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    else {
        log_event(LogLevel::Error, "mount_point_missing", json!({ "id": "app" }));
        return;
    };

    let config = LandingConfig::from_element(&root);
    logging::set_min_level(config.log_level);
    toast::configure(config.toast_show_delay_ms, config.feedback_ms);

    let observer_supported = browser::supports_intersection_observer();
    log_event(
        LogLevel::Info,
        "landing_started",
        json!({
            "particles": config.particle_count,
            "observer_supported": observer_supported,
        }),
    );

    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
}
