use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

use super::prelude::*;
use super::tag::TagLine;

/// Result card props
#[derive(Properties, PartialEq)]
pub struct Props {
    /// Data url of the source image
    pub data_url: AttrValue,
    /// Parsed `parameters` sections
    pub params: Rc<ParsedParams>,
}

/// Card with the source image and one section per parsed field
pub struct ResultCard {
    root: NodeRef,
}

impl Component for ResultCard {
    type Message = ();

    type Properties = Props;

    fn create(_: &Context<Self>) -> Self {
        Self { root: NodeRef::default() }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let sections = enum_iterator::all::<ParamField>().map(|field| {
            let text = ctx.props().params.field(field).to_string();
            html! {
                <div>
                    <div class="title">
                        { field.name() }
                        <CopyButton text={text.clone()} />
                    </div>
                    <div class="content">
                        if field == ParamField::Parameters {
                            <TagLine raw={text} />
                        } else {
                            { text }
                        }
                    </div>
                </div>
            }
        });

        html! {
            <div class="result-item" ref={self.root.clone()}>
                <div class="img-container">
                    <img src={ctx.props().data_url.clone()} />
                </div>
                <div class="info">
                    { for sections }
                </div>
            </div>
        }
    }

    fn rendered(&mut self, _: &Context<Self>, first_render: bool) {
        // Bring a freshly appended card into view
        if first_render {
            if let Some(root) = self.root.cast::<Element>() {
                root.scroll_into_view();
            }
        }
    }
}

/// Copy button props
#[derive(Properties, PartialEq)]
pub struct CopyProps {
    /// Raw text put into the clipboard
    pub text: AttrValue,
}

/// Copy outcome reflected on the button
#[derive(Default)]
enum CopyState {
    #[default]
    Idle,
    Success,
    Failed,
}

/// Button that copies one field's raw text to the clipboard
#[derive(Default)]
pub struct CopyButton {
    state: CopyState,
}

pub enum CopyMsg {
    Copy,
    Done(bool),
}

impl Component for CopyButton {
    type Message = CopyMsg;

    type Properties = CopyProps;

    fn create(_: &Context<Self>) -> Self {
        Self::default()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onclick = ctx.link().callback(|_| CopyMsg::Copy);

        let class = classes!(
            "copy",
            match self.state {
                CopyState::Idle => None,
                CopyState::Success => Some("success"),
                CopyState::Failed => Some("failed"),
            }
        );

        html! {
            <span {class} {onclick}>{ "⧉" }</span>
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CopyMsg::Copy => {
                let text = ctx.props().text.clone();
                ctx.link().send_future(async move {
                    let clipboard = web_sys::window()
                        .unwrap()
                        .navigator()
                        .clipboard();
                    let written = JsFuture::from(clipboard.write_text(&text))
                        .await
                        .is_ok();
                    CopyMsg::Done(written)
                });
                false
            }
            CopyMsg::Done(written) => {
                self.state = if written {
                    CopyState::Success
                } else {
                    CopyState::Failed
                };
                true
            }
        }
    }
}
