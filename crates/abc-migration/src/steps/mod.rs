//! Concrete migration steps, one per schema transition
//!
//! | Step                 | Target | Capability  |
//! |----------------------|--------|-------------|
//! | [`AddDefaultView`]   | 0.2.0  | pure        |
//! | [`EncryptWmsUrls`]   | 0.3.0  | interactive |
//! | [`MultiUrlWms`]      | 0.4.0  | pure        |
//! | [`LayoutFormatIds`]  | 0.5.0  | pure        |
//! | [`AddSharingFields`] | 0.6.0  | pure        |
//! | [`LegendPerLayout`]  | 0.7.0  | pure        |

mod add_default_view;
mod add_sharing_fields;
mod encrypt_wms_urls;
mod layout_format_ids;
mod legend_per_layout;
mod multi_url_wms;

pub use add_default_view::AddDefaultView;
pub use add_sharing_fields::AddSharingFields;
pub use encrypt_wms_urls::EncryptWmsUrls;
pub use layout_format_ids::LayoutFormatIds;
pub use legend_per_layout::LegendPerLayout;
pub use multi_url_wms::MultiUrlWms;
