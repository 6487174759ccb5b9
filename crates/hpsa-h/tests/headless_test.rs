use hpsa_common::selector::{Role, Selector};
use hpsa_engine::config::schema::BrowserConfig;
use hpsa_engine::driver::{DriverError, UiDriver};
use hpsa_h::HeadlessDriver;
use serial_test::serial;

const PAGE: &str = r#"<html><head><title>Support</title></head><body>
<div class="OptionCard Support" role="button" aria-label="Support" onclick="document.title='clicked support'">Support</div>
<div class="OptionCard" role="button" aria-label="Warranty" onclick="document.title='clicked warranty'">Warranty</div>
<div class="Hidden" style="display:none">gone</div>
<p><span>Serial number</span> 5CD1234XYZ</p>
<input class="Email" type="email" placeholder="Email">
<div class="List" style="height:100px;overflow:auto"><div style="height:2000px">long</div></div>
</body></html>"#;

async fn launched() -> Option<HeadlessDriver> {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .ok();

    let mut driver = HeadlessDriver::new(BrowserConfig::default());
    match driver.launch().await {
        Ok(_) => Some(driver),
        Err(e) => {
            eprintln!("Failed to launch browser (is Chromium installed?): {}", e);
            None
        }
    }
}

async fn title(driver: &HeadlessDriver) -> String {
    driver
        .get_client()
        .unwrap()
        .page
        .get_title()
        .await
        .unwrap()
        .unwrap_or_default()
}

#[tokio::test]
#[serial]
async fn test_headless_locate_and_click() {
    let Some(mut driver) = launched().await else {
        return;
    };

    let nav = driver
        .navigate(&format!("data:text/html,{}", PAGE))
        .await
        .expect("Navigation failed");
    assert_eq!(nav.title, "Support");

    let card = Selector::class("OptionCard");
    assert!(driver.exists(&card, 0).await.unwrap());
    assert!(driver.exists(&card, 1).await.unwrap());
    assert!(!driver.exists(&card, 2).await.unwrap());
    assert!(!driver.exists(&Selector::class("Hidden"), 0).await.unwrap());

    let warranty = Selector::with_role(Role::Button).name("Warranty");
    assert!(driver.exists(&warranty, 0).await.unwrap());

    let serial = Selector::with_role(Role::StaticText).name_containing("5CD1234XYZ");
    assert!(driver.exists(&serial, 0).await.unwrap());

    driver.click(&card, 1).await.unwrap();
    assert_eq!(title(&driver).await, "clicked warranty");

    let err = driver
        .click(&Selector::class("Missing"), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, DriverError::ElementNotFound { .. }));

    driver.close().await.unwrap();
    assert!(!driver.is_ready().await);
}

#[tokio::test]
#[serial]
async fn test_headless_input_scroll_and_screenshot() {
    let Some(mut driver) = launched().await else {
        return;
    };

    driver
        .navigate(&format!("data:text/html,{}", PAGE))
        .await
        .expect("Navigation failed");

    driver.focus(&Selector::class("Email"), 0).await.unwrap();
    driver.type_text("tester@example.com").await.unwrap();
    driver.press_key("Enter").await.unwrap();
    let page = &driver.get_client().unwrap().page;
    let value: String = page
        .evaluate("document.querySelector('.Email').value")
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(value, "tester@example.com");

    driver.hover(&Selector::class("List"), 0).await.unwrap();
    driver.scroll_down().await.unwrap();

    let png = driver.screenshot().await.unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    driver.close().await.unwrap();
}
