use std::rc::Rc;

use gloo::file::File;
use gloo::file::futures::{read_as_bytes, read_as_data_url};
use sdpeek_common::{webui, ParsedParams};
use yew::prelude::*;

use crate::component::dropbox::Dropbox;
use crate::component::result::ResultCard;
use crate::extract;

/// Notice shown when a file yields no usable metadata
const NO_METADATA_NOTICE: &str = "Unknown file/No metadata found";

/// One parsed file ready for display
pub struct CardData {
    /// Image encoded as data url
    pub data_url: AttrValue,
    /// Parsed `parameters` sections
    pub params: Rc<ParsedParams>,
}

/// Read the file, extract embedded metadata and split `parameters`
async fn load_file(file: &File) -> anyhow::Result<CardData> {
    let data = read_as_bytes(file).await?;
    let tags = extract::extract_metadata(&data)?;

    let raw = tags
        .get(webui::PARAMETERS_FIELD)
        .map(|field| field.value.as_str());
    let params = webui::split_params(raw)?;

    let data_url = read_as_data_url(file).await?;

    Ok(CardData {
        data_url: data_url.into(),
        params: Rc::new(params),
    })
}

/// Application root: drop target plus the list of parsed results
#[derive(Default)]
pub struct App {
    results: Vec<CardData>,
}

pub enum Msg {
    Files(Vec<web_sys::File>),
    Loaded(CardData),
    Failed(String),
}

impl Component for App {
    type Message = Msg;

    type Properties = ();

    fn create(_: &Context<Self>) -> Self {
        Self::default()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onfiles = ctx.link().callback(Msg::Files);

        let results = self.results.iter().map(|card| html! {
            <ResultCard
                data_url={card.data_url.clone()}
                params={card.params.clone()} />
        });

        html! {
            <main class="container">
                <Dropbox {onfiles} />
                <div class="result-list">
                    { for results }
                </div>
            </main>
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Files(files) => {
                for file in files {
                    // Non-image entries are skipped without notice
                    if !file.type_().starts_with("image") {
                        gloo::console::log!("skipping non-image file", file.name());
                        continue;
                    }

                    // Each file is parsed independently, results arrive
                    // in completion order
                    let file = File::from(file);
                    ctx.link().send_future(async move {
                        match load_file(&file).await {
                            Ok(card) => Msg::Loaded(card),
                            Err(e) => Msg::Failed(e.to_string()),
                        }
                    });
                }
                false
            }
            Msg::Loaded(card) => {
                self.results.push(card);
                true
            }
            Msg::Failed(err) => {
                gloo::console::warn!(err);
                gloo::dialogs::alert(NO_METADATA_NOTICE);
                false
            }
        }
    }
}
