use super::render_context::RenderContext;

/// Set to make GPU tests fail instead of skipping when no adapter exists.
const REQUIRE_GPU_VAR: &str = "LIGHT_VOLUMES_REQUIRE_GPU";

/// Headless device for GPU tests; `None` on machines without an adapter.
///
/// Panics instead when [`REQUIRE_GPU_VAR`] is set to anything but `0`.
pub(crate) fn headless_context() -> Option<RenderContext> {
    match pollster::block_on(RenderContext::headless()) {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            skip_or_fail(gpu_required(), &e.to_string());
            None
        }
    }
}

fn gpu_required() -> bool {
    std::env::var_os(REQUIRE_GPU_VAR).is_some_and(|v| !v.is_empty() && v != "0")
}

fn skip_or_fail(required: bool, reason: &str) {
    assert!(!required, "{REQUIRE_GPU_VAR} is set but no GPU: {reason}");
    log::warn!("skipping GPU test: {reason}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_adapter_skips_when_optional() {
        skip_or_fail(false, "no adapter");
    }

    #[test]
    #[should_panic(expected = "LIGHT_VOLUMES_REQUIRE_GPU is set")]
    fn missing_adapter_fails_when_required() {
        skip_or_fail(true, "no adapter");
    }
}
