//! Simulator asset: a NiceGUI event driver over the generated Python machine.
//!
//! The script is static apart from the machine's type names; it introspects
//! the event and guard enums at run time, so it needs no per-chart logic.

/// Render `simulator.py` for a machine with the given type prefix.
pub fn render_simulator(type_prefix: &str, machine_name: &str) -> String {
    let p = type_prefix;
    format!(
        r#"#!/usr/bin/env python3
# Generated by hsmgen. Interactive driver for the generated machine.

from nicegui import ui

from machine import (
    {p}ActionId,
    {p}Event,
    {p}GuardId,
    {p}Hooks,
    {machine_name},
    {p}State,
)


class TraceHooks({p}Hooks):
    """Logs every callback and resolves guards from UI switches."""

    def __init__(self, log):
        self._log = log
        self.guard_values = {{}}

    def on_entry(self, state):
        self._log.push(f"entry   {{state.name}}")

    def on_exit(self, state):
        self._log.push(f"exit    {{state.name}}")

    def guard(self, state, event, guard):
        value = self.guard_values.get(guard.name, False)
        self._log.push(f"guard   {{guard.name}} -> {{value}}")
        return value

    def action(self, state, event, action):
        self._log.push(f"action  {{action.name}}")


log = ui.log(max_lines=200)
hooks = TraceHooks(log)
machine = {machine_name}(hooks)
state_label = ui.label()


def refresh():
    suffix = " (terminated)" if machine.terminated() else ""
    state_label.set_text(f"state: {{machine.state().name}}{{suffix}}")


def fire(event):
    machine.dispatch(event)
    refresh()


def restart():
    machine.reset()
    log.clear()
    machine.start()
    refresh()


with ui.row():
    ui.button("start", on_click=lambda: (machine.start(), refresh()))
    ui.button("reset", on_click=restart)

with ui.row():
    for event in {p}Event:
        ui.button(event.name, on_click=lambda _, ev=event: fire(ev))

with ui.row():
    for guard in {p}GuardId:
        ui.switch(
            guard.name,
            on_change=lambda change, name=guard.name: hooks.guard_values.update(
                {{name: change.value}}
            ),
        )

refresh()

ui.run(title="{machine_name} simulator")
"#
    )
}
