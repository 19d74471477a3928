use cgmath::num_traits::Float;
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

/// Records a root found by inverse evaluation.
#[allow(unused)]
pub fn debug_root<T: Float>(section: usize, axis: usize, value: T, t: T) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "root",
            "section": section,
            "axis": axis,
            "value": value.to_f64(),
            "t": t.to_f64(),
        }))
    })
}

/// Takes every record made on this thread since the last call.
#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
