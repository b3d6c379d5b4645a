//! Tab panel for one pipeline stage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the stage's `FormSpec` from the shared registry: editable inputs,
//! read-only suggestions, and the stage's action buttons. Control values are
//! bound to registry entries, so edits flow back through `set_field` and
//! chain-rule copies show up without touching the DOM directly.
//!
//! The panel body only re-renders when the mounted form itself changes (a
//! `Memo` over the panel), never on value edits, so focus survives typing.

use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};

use crate::pages::pipeline_actions::{advance, run_prediction, submit_feedback};
use crate::state::forms::{
    ControlKind, FieldRef, FormSpec, InputSpec, OutputSpec, Panel, draft_out_of_sync, numeric_commit,
};
use crate::state::pipeline::PipelineState;
use crate::state::stage::{Stage, Tab};
use crate::util::field_ids::{form_id, next_button_id};

/// Panel container; shows either the stage form or a placeholder message.
#[component]
pub fn StagePanel(stage: Stage) -> impl IntoView {
    let state = expect_context::<RwSignal<PipelineState>>();
    let panel = Memo::new(move |_| state.with(|s| s.registry.panel(stage).cloned()));
    let is_active = move || state.with(|s| s.tabs.is_active(Tab::Stage(stage)));

    view! {
        <section id=stage.as_str() class="tab-content" class:active=is_active>
            {move || match panel.get() {
                Some(Panel::Form(form)) => view! { <StageForm form=form/> }.into_any(),
                Some(Panel::Placeholder(message)) => view! { <div class="form-placeholder">{message}</div> }.into_any(),
                None => view! { <div class="form-placeholder"></div> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn StageForm(form: FormSpec) -> impl IntoView {
    let state = expect_context::<RwSignal<PipelineState>>();
    let stage = form.stage;
    let inputs = form
        .inputs
        .into_iter()
        .map(|spec| input_control(state, stage, spec))
        .collect::<Vec<_>>();
    let outputs = form
        .outputs
        .into_iter()
        .map(|spec| output_control(state, stage, spec))
        .collect::<Vec<_>>();
    let suggestions = (!outputs.is_empty()).then(move || {
        view! {
            <div class="suggestions">
                <h3>"Suggestions"</h3>
                {outputs}
            </div>
        }
    });

    view! {
        <form id=form_id(stage) class="process-form" on:submit=|ev: leptos::ev::SubmitEvent| ev.prevent_default()>
            <div class="inputs">
                <h3>"Inputs"</h3>
                {inputs}
            </div>
            {suggestions}
        </form>
        <div class="button-container">{stage_actions(state, stage)}</div>
    }
}

fn input_control(state: RwSignal<PipelineState>, stage: Stage, spec: InputSpec) -> AnyView {
    let field = FieldRef::input(stage, &spec.field);
    let label = spec.label;
    match spec.kind {
        ControlKind::Number => number_control(state, field, label),
        ControlKind::Select(options) => {
            let (id, value, on_edit) = bound_control(state, field);
            view! {
                <label>
                    {label} " "
                    <select id=id required=true prop:value=value on:change=on_edit>
                        <option value="" disabled=true selected=true>"Select..."</option>
                        {options
                            .into_iter()
                            .map(|opt| view! { <option value=opt.clone()>{opt.clone()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
            }
            .into_any()
        }
        ControlKind::Text => {
            let (id, value, on_edit) = bound_control(state, field);
            view! {
                <label>
                    {label} " "
                    <input type="text" id=id required=true prop:value=value on:input=on_edit/>
                </label>
            }
            .into_any()
        }
    }
}

/// Id, value reader, and edit handler for a control that writes every edit
/// straight into the registry.
fn bound_control(
    state: RwSignal<PipelineState>,
    field: FieldRef,
) -> (String, impl Fn() -> String + Send + Sync + 'static, impl Fn(leptos::ev::Event) + 'static) {
    let id = field.dom_id();
    let read_ref = field.clone();
    let value = move || state.with(|s| s.registry.get(&read_ref).unwrap_or_default().to_owned());
    let on_edit = move |ev: leptos::ev::Event| {
        let next = event_target_value(&ev);
        state.update(|s| s.set_field(&field, next));
    };
    (id, value, on_edit)
}

/// Numeric input edited through a local draft. Partial text such as `-` stays
/// in the draft; only text that commits reaches the registry. Registry
/// changes made elsewhere (chain copies) replace the draft.
fn number_control(state: RwSignal<PipelineState>, field: FieldRef, label: String) -> AnyView {
    let id = field.dom_id();
    let stored = Memo::new({
        let field = field.clone();
        move |_| state.with(|s| s.registry.get(&field).unwrap_or_default().to_owned())
    });
    let draft = RwSignal::new(stored.get_untracked());

    Effect::new(move || {
        let stored = stored.get();
        if draft.with_untracked(|d| draft_out_of_sync(d, &stored)) {
            draft.set(stored);
        }
    });

    let on_edit = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        if let Some(value) = numeric_commit(&raw) {
            state.update(|s| s.set_field(&field, value));
        }
        draft.set(raw);
    };
    let on_blur = move |_: leptos::ev::FocusEvent| {
        let stored = stored.get_untracked();
        if draft.with_untracked(|d| draft_out_of_sync(d, &stored)) {
            draft.set(stored);
        }
    };

    view! {
        <label>
            {label} " "
            <input
                type="text"
                inputmode="decimal"
                id=id
                required=true
                prop:value=move || draft.get()
                on:input=on_edit
                on:blur=on_blur
            />
        </label>
    }
    .into_any()
}

fn output_control(state: RwSignal<PipelineState>, stage: Stage, spec: OutputSpec) -> AnyView {
    let field = FieldRef::output(stage, &spec.field);
    let id = field.dom_id();
    let value = move || state.with(|s| s.registry.get(&field).unwrap_or_default().to_owned());

    view! {
        <label>
            {spec.label} " "
            <input type="text" id=id readonly=true prop:value=value/>
        </label>
    }
    .into_any()
}

fn stage_actions(state: RwSignal<PipelineState>, stage: Stage) -> AnyView {
    if !stage.has_prediction() {
        return view! {
            <button class="submit-button" type="button" on:click=move |_| submit_feedback(state)>
                "Submit Feedback"
            </button>
        }
        .into_any();
    }

    let next_display = move || if state.with(|s| s.next_visible(stage)) { "inline-block" } else { "none" };
    view! {
        <button class="predict-button" type="button" on:click=move |_| run_prediction(state, stage)>
            "Get Suggestions"
        </button>
        <button
            class="next-button"
            type="button"
            id=next_button_id(stage)
            style:display=next_display
            on:click=move |_| advance(state, stage)
        >
            "Next >"
        </button>
    }
    .into_any()
}
