//! product-page-wasm: browser host bridge
//!
//! Exports:
//!   input_ptr()              → *mut u8    host writes page/action JSON here
//!   init(len)                → u32        bind page JSON, returns output length
//!   dispatch(len, now_ms)    → u32        run action JSON at `now_ms`, returns output length
//!   tick(now_ms)             → u32        fire due timers, returns output length
//!   output_ptr()             → *const u8  last output (snapshot or error JSON)
//!   output_len()             → u32
//!
//! Output is `{"root": <page>}` on success or `{"error": "..."}`.

use product_page_core::{load_page, parse_action, DomView, PageConfig, PageController, PageError};
use std::cell::RefCell;

const INPUT_CAP: usize = 65536;

thread_local! {
    static INPUT: RefCell<Vec<u8>> = RefCell::new(vec![0u8; INPUT_CAP]);
    static OUTPUT: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
    static SESSION: RefCell<Option<PageController<DomView>>> = const { RefCell::new(None) };
}

/// Page bound by `init`, driven by every later call.
fn with_session<R>(f: impl FnOnce(&mut PageController<DomView>) -> R) -> Result<R, PageError> {
    SESSION.with(|s| match s.borrow_mut().as_mut() {
        Some(controller) => Ok(f(controller)),
        None => Err(PageError::NotInitialized),
    })
}

fn input(len: u32) -> Vec<u8> {
    INPUT.with(|b| {
        let buf = b.borrow();
        let len = (len as usize).min(buf.len());
        buf[..len].to_vec()
    })
}

pub fn start(page_json: &[u8]) -> Result<String, PageError> {
    let page: product_dom::DomNode = serde_json::from_slice(page_json)?;
    let controller = load_page(page, PageConfig::default())?;
    let snapshot = controller.view().snapshot_json()?;
    SESSION.with(|s| *s.borrow_mut() = Some(controller));
    Ok(snapshot)
}

pub fn handle(action_json: &[u8], now_ms: u64) -> Result<String, PageError> {
    let action = parse_action(action_json)?;
    with_session(|c| {
        c.dispatch_at(now_ms, action);
        c.view().snapshot_json()
    })?
}

pub fn advance(now_ms: u64) -> Result<String, PageError> {
    with_session(|c| {
        c.advance_to(now_ms);
        c.view().snapshot_json()
    })?
}

fn error_json(e: &PageError) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

/// Store `result` as the current output and return its length.
fn finish(result: Result<String, PageError>) -> u32 {
    let out = result.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "host call failed");
        error_json(&e)
    });
    let len = out.len() as u32;
    OUTPUT.with(|o| *o.borrow_mut() = out.into_bytes());
    len
}

fn millis(now_ms: f64) -> u64 {
    if now_ms.is_finite() && now_ms > 0.0 {
        now_ms as u64
    } else {
        0
    }
}

/// Return pointer to the input scratch buffer. JS writes page/action data here.
#[no_mangle]
pub extern "C" fn input_ptr() -> *mut u8 {
    INPUT.with(|b| b.borrow_mut().as_mut_ptr())
}

#[no_mangle]
pub extern "C" fn init(len: u32) -> u32 {
    finish(start(&input(len)))
}

#[no_mangle]
pub extern "C" fn dispatch(len: u32, now_ms: f64) -> u32 {
    finish(handle(&input(len), millis(now_ms)))
}

#[no_mangle]
pub extern "C" fn tick(now_ms: f64) -> u32 {
    finish(advance(millis(now_ms)))
}

#[no_mangle]
pub extern "C" fn output_ptr() -> *const u8 {
    OUTPUT.with(|o| o.borrow().as_ptr())
}

#[no_mangle]
pub extern "C" fn output_len() -> u32 {
    OUTPUT.with(|o| o.borrow().len() as u32)
}
