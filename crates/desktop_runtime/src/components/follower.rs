use super::*;
use leptos::leptos_dom::helpers::AnimationFrameRequestHandle;
use crate::{
    follower::{follower_area, FollowerMotion, FOLLOWER_SIZE},
    host,
};

fn schedule_frame(
    motion: StoredValue<FollowerMotion>,
    transform: RwSignal<String>,
    frame: StoredValue<Option<AnimationFrameRequestHandle>>,
) {
    let requested = request_animation_frame_with_handle(move || {
        // Gone once the component is disposed.
        let Some(pose) = motion.try_update_value(|motion| motion.step()) else {
            return;
        };
        transform.set(pose.css_transform());
        schedule_frame(motion, transform, frame);
    });
    match requested {
        Ok(handle) => {
            frame.try_update_value(|slot| *slot = Some(handle));
        }
        Err(err) => logging::warn!("follower animation stopped: {err:?}"),
    }
}

#[component]
pub(super) fn DuckFollower() -> impl IntoView {
    let motion = store_value(FollowerMotion::new(follower_area(host::viewport_size())));
    let transform = create_rw_signal(motion.with_value(|m| m.rest_pose().css_transform()));
    let frame = store_value(None::<AnimationFrameRequestHandle>);

    let pointer_listener = window_event_listener(ev::pointermove, move |ev| {
        let area = follower_area(host::viewport_size());
        motion.update_value(|motion| {
            motion.set_target(f64::from(ev.client_x()), f64::from(ev.client_y()), area)
        });
    });
    on_cleanup(move || pointer_listener.remove());

    schedule_frame(motion, transform, frame);
    on_cleanup(move || {
        if let Some(handle) = frame.try_update_value(Option::take).flatten() {
            handle.cancel();
        }
    });

    view! {
        <div
            class="desktop-duck"
            aria-hidden="true"
            style=move || {
                format!(
                    "position:fixed;left:0;top:0;width:{FOLLOWER_SIZE}px;height:{FOLLOWER_SIZE}px;\
                     pointer-events:none;z-index:9999;transform-origin:50% 80%;transform:{};",
                    transform.get()
                )
            }
        >
            <div class="duck-body"></div>
            <div class="duck-neck"></div>
            <div class="duck-head">
                <div class="duck-eye"></div>
                <div class="duck-beak"></div>
            </div>
            <div class="duck-foot duck-foot--left"></div>
            <div class="duck-foot duck-foot--right"></div>
        </div>
    }
}
