//! Per-route page metadata (title, description, canonical, Open Graph).

use serde::Serialize;

use crate::config::StorefrontConfig;
use crate::domain::settings::SITE_NAME;
use crate::domain::value_objects::Vnd;
use crate::Product;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub og_title: String,
    pub og_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

struct StaticPage {
    path: &'static str,
    title: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
    og_title: &'static str,
    og_description: &'static str,
}

const PAGES: &[StaticPage] = &[
    StaticPage {
        path: "/",
        title: "Hỷ Lạc Việt - Áo Dài & Pháp Phục Cao Cấp",
        description: "Nơi nghệ thuật áo dài truyền thống hội tụ cùng tâm huyết của những nghệ nhân lành nghề. Mỗi tác phẩm là một câu chuyện văn hóa được thêu dệt bằng sự tinh tế.",
        keywords: &["áo dài", "pháp phục", "áo dài cao cấp", "áo dài Việt Nam", "hỷ lạc việt", "áo dài cưới", "may áo dài"],
        og_title: "Hỷ Lạc Việt - Áo Dài & Pháp Phục Cao Cấp",
        og_description: "Nơi nghệ thuật áo dài truyền thống hội tụ cùng tâm huyết của những nghệ nhân lành nghề",
    },
    StaticPage {
        path: "/san-pham",
        title: "Sản Phẩm | Hỷ Lạc Việt - Bộ Sưu Tập Áo Dài & Pháp Phục",
        description: "Khám phá bộ sưu tập áo dài và pháp phục cao cấp Hỷ Lạc Việt. Áo dài ngũ thân, áo dài cưới, pháp phục linen — tất cả may đo thủ công bằng lụa tơ tằm và gấm nhung.",
        keywords: &["bộ sưu tập áo dài", "áo dài ngũ thân", "áo dài cưới", "pháp phục linen"],
        og_title: "Bộ Sưu Tập | Hỷ Lạc Việt",
        og_description: "Bộ sưu tập áo dài & pháp phục cao cấp — may đo thủ công từ lụa tơ tằm, gấm nhung.",
    },
    StaticPage {
        path: "/gioi-thieu",
        title: "Giới Thiệu | Hỷ Lạc Việt - Câu Chuyện Áo Dài Cao Cấp",
        description: "Hành trình gìn giữ và phát triển nghệ thuật áo dài Việt Nam. Từ năm 2018, Hỷ Lạc Việt đã kiến tạo hàng nghìn tác phẩm áo dài cao cấp bằng tay nghề thủ công tinh xảo.",
        keywords: &["câu chuyện áo dài", "nghệ nhân áo dài", "hỷ lạc việt"],
        og_title: "Giới Thiệu | Hỷ Lạc Việt",
        og_description: "Hành trình gìn giữ và phát triển nghệ thuật áo dài Việt Nam từ năm 2018.",
    },
    StaticPage {
        path: "/may-do",
        title: "May Đo Áo Dài | Hỷ Lạc Việt - Bespoke Tailoring Cao Cấp",
        description: "Dịch vụ may đo áo dài theo yêu cầu. 5 bước kiến tạo tác phẩm độc bản: tư vấn, đo số, chọn chất liệu, thêu tay, hoàn thiện. Chất liệu lụa tơ tằm, gấm nhung cao cấp.",
        keywords: &["may đo áo dài", "áo dài theo yêu cầu", "bespoke áo dài", "may áo dài cao cấp", "thêu tay áo dài", "áo dài lụa tơ tằm"],
        og_title: "May Đo Áo Dài | Hỷ Lạc Việt",
        og_description: "Dịch vụ may đo áo dài bespoke — 5 bước kiến tạo tác phẩm độc bản từ lụa tơ tằm, gấm nhung cao cấp.",
    },
    StaticPage {
        path: "/lien-he",
        title: "Liên Hệ | Hỷ Lạc Việt - Đặt Lịch Tư Vấn Áo Dài",
        description: "Liên hệ Hỷ Lạc Việt để đặt lịch tư vấn và may đo áo dài cao cấp. Showroom tại Hà Nội. Hotline: 0912 503 456. Đón khách 8:00 - 20:00, Thứ 2 - Thứ 7.",
        keywords: &["liên hệ hỷ lạc việt", "tư vấn áo dài", "showroom áo dài hà nội"],
        og_title: "Liên Hệ | Hỷ Lạc Việt",
        og_description: "Đặt lịch tư vấn may đo áo dài cao cấp. Showroom Hà Nội — Hotline: 0912 503 456.",
    },
];

pub fn static_page(path: &str, config: &StorefrontConfig) -> Option<PageMetadata> {
    let normalized = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    PAGES.iter().find(|page| page.path == normalized).map(|page| PageMetadata {
        title: page.title.to_string(),
        description: page.description.to_string(),
        keywords: page.keywords.iter().map(|k| k.to_string()).collect(),
        canonical: config.site_link(page.path),
        og_title: page.og_title.to_string(),
        og_description: page.og_description.to_string(),
        og_image: None,
    })
}

const DESCRIPTION_CHARS: usize = 160;

/// Metadata for `/san-pham/{id}`, built from the product at request time.
pub fn product_page(product: &Product, config: &StorefrontConfig) -> PageMetadata {
    let description = if product.description.trim().is_empty() {
        format!("{} - {} tại {}", product.name, Vnd::new(product.price), SITE_NAME)
    } else {
        product.description.chars().take(DESCRIPTION_CHARS).collect()
    };
    let og_image = product.images.first().filter(|u| !u.is_empty()).map(|u| {
        if u.starts_with('/') { config.site_link(u) } else { u.clone() }
    });

    PageMetadata {
        title: format!("{} | {}", product.name, SITE_NAME),
        og_title: product.name.clone(),
        og_description: description.clone(),
        description,
        keywords: vec![product.name.to_lowercase(), "áo dài".to_string(), "hỷ lạc việt".to_string()],
        canonical: config.site_link(&format!("/san-pham/{}", product.id)),
        og_image,
    }
}
