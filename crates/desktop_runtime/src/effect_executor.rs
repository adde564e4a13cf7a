//! Runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::{reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the queue before running anything so effects dispatched from subscribers land in a
    // fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::Lifecycle(event) => {
            let bus = runtime.lifecycle.get_value();
            bus.publish(&event);
        }
        RuntimeEffect::OpenNotesList => runtime.notes.open_list(),
        RuntimeEffect::IconDropResolved(report) => {
            for line in report.log_lines() {
                logging::log!("{line}");
            }
        }
    }
}
