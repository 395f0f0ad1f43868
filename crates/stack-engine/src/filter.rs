//! Filter graph construction for the 2x2 camera grid.

use sentry_stack_event_model::{CameraView, SentryEvent};

use crate::job::StackParams;

/// Build the `-filter_complex` graph for `event`.
///
/// Input indices follow [`SentryEvent::present_views`], which is the order
/// the job emits `-i` arguments in. Missing cameras become black `color`
/// sources of `blank_size`; `shortest=1` on the stacks stops the output
/// when the real clips end.
pub fn build_filter_graph(
    event: &SentryEvent,
    params: StackParams,
    blank_size: (u32, u32),
) -> String {
    let scale = params.scale.max(1);
    let speed = params.speed.max(1);
    let (blank_w, blank_h) = blank_size;

    let mut chains = Vec::with_capacity(8);
    let mut input_index = 0;
    for view in CameraView::GRID_ORDER {
        let label = view.label();
        if event.clip(view).is_some() {
            chains.push(format!(
                "[{input_index}:v]scale=iw/{scale}:ih/{scale}[{label}]"
            ));
            input_index += 1;
        } else {
            chains.push(format!("color=c=black:s={blank_w}x{blank_h}[{label}]"));
        }
    }

    chains.push(hstack(CameraView::Front, CameraView::Back, "long"));
    chains.push(hstack(CameraView::RightRepeater, CameraView::LeftRepeater, "lat"));
    chains.push("[long][lat]vstack=inputs=2:shortest=1[all]".to_string());
    chains.push(format!("[all]setpts=PTS/{speed}[res]"));

    chains.join(";")
}

fn hstack(left: CameraView, right: CameraView, out: &str) -> String {
    format!(
        "[{}][{}]hstack=inputs=2:shortest=1[{out}]",
        left.label(),
        right.label()
    )
}
