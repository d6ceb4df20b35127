use web_sys::{FileList, HtmlInputElement};

use super::prelude::*;

/// Drop target props
#[derive(Properties, PartialEq)]
pub struct Props {
    /// Called with files dropped or picked by the user
    pub onfiles: Callback<Vec<web_sys::File>>,
}

/// Drop target that also opens a file picker on click
#[derive(Default)]
pub struct Dropbox {
    dragged_over: bool,
    input: NodeRef,
}

pub enum Msg {
    Enter,
    Leave,
    Drop(DragEvent),
    OpenPicker,
    Picked,
}

impl Component for Dropbox {
    type Message = Msg;

    type Properties = Props;

    fn create(_: &Context<Self>) -> Self {
        Self::default()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let ondragenter = ctx.link().callback(|_| Msg::Enter);
        let ondragleave = ctx.link().callback(|_| Msg::Leave);
        let ondragover = Callback::from(|ev: DragEvent| {
            ev.stop_propagation();
            ev.prevent_default();
        });
        let ondrop = ctx.link().callback(|ev: DragEvent| {
            ev.stop_propagation();
            ev.prevent_default();
            Msg::Drop(ev)
        });
        let onclick = ctx.link().callback(|_| Msg::OpenPicker);
        let onchange = ctx.link().callback(|_| Msg::Picked);

        // Synthetic click on the input must not reopen the picker
        let onclick_input = Callback::from(|ev: MouseEvent| {
            ev.stop_propagation();
        });

        let class = classes!(
            "dropbox",
            self.dragged_over.then_some("enter")
        );

        html! {
            <div {class}
                {onclick}
                {ondragenter}
                {ondragleave}
                {ondragover}
                {ondrop}>
                { "Drop images here or click to select" }
                <input
                    type="file"
                    accept="image/*"
                    multiple=true
                    hidden=true
                    onclick={onclick_input}
                    {onchange}
                    ref={self.input.clone()} />
            </div>
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Enter => {
                self.dragged_over = true;
                true
            }
            Msg::Leave => {
                self.dragged_over = false;
                true
            }
            Msg::Drop(ev) => {
                self.dragged_over = false;

                let files = ev
                    .data_transfer()
                    .and_then(|transfer| transfer.files());
                if let Some(files) = files {
                    ctx.props().onfiles.emit(collect_files(&files));
                }
                true
            }
            Msg::OpenPicker => {
                self.input.cast::<HtmlInputElement>().unwrap().click();
                false
            }
            Msg::Picked => {
                let input = self.input.cast::<HtmlInputElement>().unwrap();
                if let Some(files) = input.files() {
                    ctx.props().onfiles.emit(collect_files(&files));
                }
                false
            }
        }
    }
}

fn collect_files(list: &FileList) -> Vec<web_sys::File> {
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .collect()
}
