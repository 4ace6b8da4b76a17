use application::usage_table::UsageTable;
use dioxus::prelude::*;

#[component]
pub fn UsageTableView(table: UsageTable) -> Element {
    let [key_header, count_header] = table.headers();

    rsx! {
        table { class: "usage-table",
            thead {
                tr {
                    th { "{key_header}" }
                    th { "{count_header}" }
                }
            }
            tbody {
                for row in table.rows.iter() {
                    tr { key: "{row.api_key}",
                        td { class: "api-key", "{row.api_key}" }
                        td { "{row.count}" }
                    }
                }
            }
        }
    }
}
