//! Browser side of the photo roster
//!
//! Counter animation on `requestAnimationFrame`, existence probes through
//! detached `<img>` elements and lazy loading through an
//! `IntersectionObserver`.

use crate::error::{describe, Result, WebError};
use js_sys::{Array, Function, Promise};
use keepsake_gallery::{
    lazy::{revealed_class, FAILED_CONTAINER_OPACITY},
    CountAnimation, GalleryConfig, ImagePlan, PhotoRoster, ValidationRun,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};
use tracing::{debug, error, info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, Window,
};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Marks the animation run that currently owns a counter element
const RUN_ATTRIBUTE: &str = "data-count-run";

pub struct Gallery {
    window: Window,
    document: Document,
    config: GalleryConfig,
    roster: RefCell<PhotoRoster>,
    next_run: Cell<u64>,
}

impl Gallery {
    pub fn new(window: &Window, document: &Document, config: GalleryConfig) -> Self {
        let roster = PhotoRoster::from_config(&config);
        info!(photos = roster.count(), "Photo roster loaded");
        Self {
            window: window.clone(),
            document: document.clone(),
            config,
            roster: RefCell::new(roster),
            next_run: Cell::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.roster.borrow().count()
    }

    pub fn all_paths(&self) -> Vec<String> {
        self.roster.borrow().all_paths()
    }

    pub fn path_of(&self, filename: &str) -> String {
        self.roster.borrow().path_of(filename)
    }

    /// Add a photo and refresh the counters
    pub fn add(&self, filename: &str) -> Result<()> {
        self.roster.borrow_mut().add(filename)?;
        self.update_counts();
        Ok(())
    }

    /// Remove a photo and refresh the counters
    pub fn remove(&self, filename: &str) -> Result<()> {
        self.roster.borrow_mut().remove(filename)?;
        self.update_counts();
        Ok(())
    }

    /// Animate every configured counter element present on this page
    pub fn update_counts(&self) {
        for id in &self.config.counter_ids {
            if let Some(element) = self.document.get_element_by_id(id) {
                self.animate_count(element, self.config.count_duration());
            }
        }
    }

    /// Count `element` up from 0 to the roster size over `duration`
    ///
    /// Restarting on the same element stops the earlier run.
    pub fn animate_count(&self, element: Element, duration: Duration) {
        let target = u32::try_from(self.count()).unwrap_or(u32::MAX);
        let run = self.next_run.get().wrapping_add(1);
        self.next_run.set(run);
        let run = run.to_string();
        if let Err(e) = element.set_attribute(RUN_ATTRIBUTE, &run) {
            warn!(error = %describe(&e), "Could not tag counter element");
            return;
        }

        let mut animation = CountAnimation::new(target, duration);
        let window = self.window.clone();
        let slot: FrameCallback = Rc::new(RefCell::new(None));
        let next = Rc::clone(&slot);

        *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            if element.get_attribute(RUN_ATTRIBUTE).as_deref() != Some(run.as_str()) {
                // Superseded by a newer run
                let _ = next.borrow_mut().take();
                return;
            }
            let frame = animation.frame(timestamp);
            element.set_inner_html(&frame.value.to_string());
            if frame.finished {
                let _ = next.borrow_mut().take();
                return;
            }
            if let Some(callback) = next.borrow().as_ref() {
                request_frame(&window, callback);
            }
        }));

        if let Some(callback) = slot.borrow().as_ref() {
            request_frame(&self.window, callback);
        }
        debug!(photos = target, "Counting photos");
    }

    /// Resolve with the filenames whose images load, in roster order
    pub fn valid_photos(&self) -> Promise {
        let run = ValidationRun::new(&self.roster.borrow());
        let probes: Array = run
            .candidates()
            .map(|(_, path)| JsValue::from(validate_exists(path)))
            .collect();
        let settled = Promise::all(&probes);

        future_to_promise(async move {
            let mut run = run;
            let results = JsFuture::from(settled).await?;
            for (index, loaded) in Array::from(&results).iter().enumerate() {
                run.record(index, loaded.as_bool().unwrap_or(false));
            }
            let missing = run.missing().len();
            if missing > 0 {
                warn!(missing, "Some photos could not be loaded");
            }
            let valid: Array = run.valid().into_iter().map(JsValue::from).collect();
            Ok(valid.into())
        })
    }

    /// Build an `<img>`, deferred behind `observer` when one is given
    pub fn load_image(
        &self,
        src: &str,
        alt: &str,
        class_name: &str,
        observer: Option<&IntersectionObserver>,
    ) -> Result<HtmlImageElement> {
        let plan = ImagePlan::new(src, alt, class_name, observer.is_some());
        let image: HtmlImageElement = self
            .document
            .create_element("img")?
            .dyn_into()
            .map_err(|_| WebError::Js("img is not an HtmlImageElement".to_string()))?;

        image.set_src(&plan.src);
        image.set_class_name(&plan.class_name);
        image.set_alt(&plan.alt);
        if let Some(data_src) = &plan.data_src {
            image.set_attribute("data-src", data_src)?;
        }

        let failed = image.clone();
        let on_error = Closure::once_into_js(move || hide_broken(&failed));
        image.set_onerror(Some(on_error.unchecked_ref()));

        if let Some(observer) = observer {
            observer.observe(&image);
        }
        Ok(image)
    }

    /// Observer that swaps in `data-src` once an image scrolls into view
    ///
    /// `None` when the browser has no `IntersectionObserver`; images are then
    /// loaded eagerly.
    pub fn create_lazy_observer(&self) -> Option<IntersectionObserver> {
        let supported =
            js_sys::Reflect::has(self.window.as_ref(), &JsValue::from_str("IntersectionObserver"))
                .unwrap_or(false);
        if !supported {
            debug!("IntersectionObserver unavailable, loading images eagerly");
            return None;
        }

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        reveal(&entry.target());
                        observer.unobserve(&entry.target());
                    }
                }
            },
        );

        match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                callback.forget();
                Some(observer)
            }
            Err(e) => {
                warn!(error = %describe(&e), "Could not create IntersectionObserver");
                None
            }
        }
    }
}

/// Resolve `true` if the image at `src` loads, `false` otherwise
pub fn validate_exists(src: &str) -> Promise {
    Promise::new(&mut |resolve: Function, _reject: Function| {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(e) => {
                warn!(error = %describe(&e), "Could not create probe image");
                let _ = resolve.call1(&JsValue::NULL, &JsValue::FALSE);
                return;
            }
        };

        // One handler for both outcomes; an image fires exactly one of them
        let settle = Closure::once_into_js({
            let src = src.to_string();
            move |event: Event| {
                let loaded = event.type_() == "load";
                if !loaded {
                    debug!(src = %src, "Image failed to load");
                }
                let _ = resolve.call1(&JsValue::NULL, &JsValue::from_bool(loaded));
            }
        });
        image.set_onload(Some(settle.unchecked_ref()));
        image.set_onerror(Some(settle.unchecked_ref()));
        image.set_src(src);
    })
}

fn reveal(target: &Element) {
    if let Some(src) = target.get_attribute("data-src") {
        if let Some(image) = target.dyn_ref::<HtmlImageElement>() {
            image.set_src(&src);
        }
    }
    target.set_class_name(&revealed_class(&target.class_name()));
}

fn hide_broken(image: &HtmlImageElement) {
    error!(src = %image.src(), "Image failed to load");
    let _ = image.style().set_property("display", "none");
    if let Some(parent) = image
        .parent_element()
        .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
    {
        let _ = parent.style().set_property("opacity", FAILED_CONTAINER_OPACITY);
    }
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut(f64)>) {
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        warn!(error = %describe(&e), "requestAnimationFrame failed");
    }
}
