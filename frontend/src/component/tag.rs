use super::prelude::*;

/// Settings tag list props
#[derive(Properties, PartialEq)]
pub struct Props {
    /// Raw settings section of the `parameters` field
    pub raw: AttrValue,
}

/// Settings rendered as tags, highlighted keys first
#[function_component]
pub fn TagLine(props: &Props) -> Html {
    let tags = webui::format_settings(&props.raw)
        .into_iter()
        .map(|tag| {
            let class = classes!(
                "tag",
                tag.highlighted.then_some("highlight")
            );

            // Escaped `\n` inside a value becomes a line break
            let text: Html = tag
                .lines()
                .enumerate()
                .map(|(idx, line)| html! {
                    <>
                        if idx > 0 { <br/> }
                        { line.to_string() }
                    </>
                })
                .collect();

            html! {
                <span {class}>{ text }</span>
            }
        });

    html! {
        <div class="tag-line">
            { for tags }
        </div>
    }
}
